use crate::domain::model::Document;
use crate::utils::error::Result;

/// A place a whole [`Document`] is loaded from and saved back to.
pub trait Storage {
    fn load(&self) -> Result<Document>;
    fn save(&self, document: &Document) -> Result<()>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}
