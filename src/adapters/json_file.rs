use crate::domain::model::Document;
use crate::domain::ports::Storage;
use crate::utils::error::{RegistrarError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What to do when the database file exists but is not a readable document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Refuse to open; the file stays as it is.
    #[default]
    Fail,
    /// Move the file aside as `<file>.corrupt-<timestamp>` and start empty.
    Reset,
}

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    on_corrupt: CorruptPolicy,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            on_corrupt: CorruptPolicy::default(),
        }
    }

    pub fn with_corrupt_policy(mut self, on_corrupt: CorruptPolicy) -> Self {
        self.on_corrupt = on_corrupt;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".corrupt-{stamp}"));
        PathBuf::from(name)
    }

    fn recover(&self, error: serde_json::Error) -> Result<Document> {
        match self.on_corrupt {
            CorruptPolicy::Fail => {
                tracing::error!("❌ Error decoding JSON from {}: {}", self.path.display(), error);
                Err(RegistrarError::DecodeError {
                    path: self.path.clone(),
                    message: error.to_string(),
                })
            }
            CorruptPolicy::Reset => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup)?;
                tracing::warn!(
                    "⚠️ Error decoding JSON from {} ({}); moved it to {} and starting with an empty database",
                    self.path.display(),
                    error,
                    backup.display()
                );
                Ok(Document::default())
            }
        }
    }
}

/// Four-space indented JSON; map keys come out as strings.
pub fn encode_document(document: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    Ok(buf)
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            tracing::info!(
                "Database file {} not found. Creating a new one.",
                self.path.display()
            );
            self.save(&Document::default())?;
        }

        let data = fs::read(&self.path)?;
        match serde_json::from_slice::<Document>(&data) {
            Ok(document) => Ok(document),
            Err(e) => self.recover(e),
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let data = encode_document(document)?;
        let dir = self.directory();
        fs::create_dir_all(dir)?;

        // 先寫入暫存檔再改名，避免寫到一半的檔案
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&data)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
