use crate::domain::model::Document;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Keeps the document in memory. Clones share the same backing document.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Rc<RefCell<Document>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
            saves: Rc::default(),
        }
    }

    pub fn snapshot(&self) -> Document {
        self.document.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Document> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &Document) -> Result<()> {
        *self.document.borrow_mut() = document.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
