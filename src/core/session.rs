use crate::domain::model::Document;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::ops::{Deref, DerefMut};

/// Owns the loaded [`Document`] and writes it back when released.
///
/// The save happens whether or not the work done in between succeeded, so a
/// failed command persists whatever it changed before failing. There is no
/// rollback.
pub struct Session<S: Storage> {
    storage: S,
    document: Document,
    closed: bool,
}

impl<S: Storage> Session<S> {
    pub fn open(storage: S) -> Result<Self> {
        let document = storage.load()?;
        tracing::debug!(
            "Opened session on {} ({} students, {} courses, {} registrations)",
            storage.describe(),
            document.students.len(),
            document.courses.len(),
            document.enrollments.len()
        );
        Ok(Self {
            storage,
            document,
            closed: false,
        })
    }

    /// Opens a session, runs `f` against the document and saves on the way out.
    ///
    /// When `f` fails its error is returned even if the save fails too; the
    /// save error is logged in that case.
    pub fn run<T, F>(storage: S, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let mut session = Self::open(storage)?;
        let outcome = f(&mut session.document);
        let saved = session.close();

        match (outcome, saved) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(save_error)) => {
                tracing::error!("❌ Failed to save database after error: {}", save_error);
                Err(e)
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Saves now and reports the result instead of leaving it to `Drop`.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.document)?;
        tracing::debug!("Saved session to {}", self.storage.describe());
        Ok(())
    }
}

impl<S: Storage> Deref for Session<S> {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

impl<S: Storage> DerefMut for Session<S> {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.document
    }
}

impl<S: Storage> Drop for Session<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.persist() {
            tracing::error!("❌ Failed to save {} on drop: {}", self.storage.describe(), e);
        }
    }
}
