pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CorruptPolicy, JsonFileStorage, MemoryStorage};
pub use config::{Cli, Command, RegistrarConfig};
pub use crate::core::session::Session;
pub use domain::model::{Course, CourseId, Document, Enrollment, Student, StudentId};
pub use domain::ports::Storage;
pub use utils::error::{RegistrarError, Result};
