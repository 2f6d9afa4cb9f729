use std::path::{Path, PathBuf};

use bayan_core::links::HISTORY_KEY;
use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;
use tracing::debug;

use crate::error::StorageError;
use crate::store::{self, HistoryStore};

/// `<HISTORY_KEY>.json`.
pub fn history_file_name() -> String {
    format!("{HISTORY_KEY}.json")
}

/// [`HistoryStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store history as [`history_file_name`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(history_file_name()))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl HistoryStore for FileStore {
    fn get(&self, locale: Locale) -> Result<Vec<Message>, StorageError> {
        let blob = self.read()?;
        let mut map = store::decode(blob.as_deref())?;
        Ok(map.remove(&locale).unwrap_or_default())
    }

    fn put(&self, locale: Locale, messages: &[Message]) -> Result<(), StorageError> {
        let blob = self.read()?;
        let updated = store::replace_locale(blob.as_deref(), locale, messages)?;

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        // Write to a temp file then rename so a crash never leaves half a file.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &updated).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), %locale, count = messages.len(), "history saved");
        Ok(())
    }
}
