use std::sync::Mutex;

use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;

use crate::error::StorageError;
use crate::store::{self, HistoryStore};

/// In-process [`HistoryStore`], used by tests and by hosts that do not
/// persist across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary stored value, e.g. a corrupt one.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Mutex::new(Some(bytes.into())),
        }
    }

    /// The raw stored value, if anything has been written.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.blob.lock().ok().and_then(|blob| blob.clone())
    }
}

impl HistoryStore for MemoryStore {
    fn get(&self, locale: Locale) -> Result<Vec<Message>, StorageError> {
        let blob = self
            .blob
            .lock()
            .map_err(|_| StorageError::Unavailable("history lock poisoned".to_string()))?;
        let mut map = store::decode(blob.as_deref())?;
        Ok(map.remove(&locale).unwrap_or_default())
    }

    fn put(&self, locale: Locale, messages: &[Message]) -> Result<(), StorageError> {
        let mut blob = self
            .blob
            .lock()
            .map_err(|_| StorageError::Unavailable("history lock poisoned".to_string()))?;
        let updated = store::replace_locale(blob.as_deref(), locale, messages)?;
        *blob = Some(updated);
        Ok(())
    }
}
