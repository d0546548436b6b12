pub mod session;
pub mod store;

pub use crate::domain::model::Document;
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
