// Adapters layer: concrete storage backends behind `domain::ports::Storage`.

pub mod json_file;
pub mod memory;

pub use json_file::{CorruptPolicy, JsonFileStorage};
pub use memory::MemoryStorage;
