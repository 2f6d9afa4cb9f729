use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;
use bayan_core::models::transcript::{self, HistoryMap};
use tracing::warn;

use crate::error::StorageError;

/// Persistence capability for widget history.
///
/// Implementations keep every locale under one key and rewrite the whole
/// map on each `put`. Reads of a locale with no saved history return an
/// empty list.
pub trait HistoryStore: Send + Sync {
    fn get(&self, locale: Locale) -> Result<Vec<Message>, StorageError>;

    fn put(&self, locale: Locale, messages: &[Message]) -> Result<(), StorageError>;
}

/// Decode a stored blob. `None` (nothing stored yet) is an empty map.
pub fn decode(blob: Option<&[u8]>) -> Result<HistoryMap, StorageError> {
    match blob {
        None => Ok(HistoryMap::new()),
        Some(bytes) => {
            transcript::decode_history(bytes).map_err(|e| StorageError::Corrupt(e.to_string()))
        }
    }
}

/// Replace one locale in a stored blob and return the new blob.
///
/// A corrupt existing blob is discarded rather than blocking the write.
pub fn replace_locale(
    blob: Option<&[u8]>,
    locale: Locale,
    messages: &[Message],
) -> Result<Vec<u8>, StorageError> {
    let mut map = decode(blob).unwrap_or_else(|e| {
        warn!(error = %e, "discarding unreadable history before write");
        HistoryMap::new()
    });
    map.insert(locale, messages.to_vec());
    Ok(transcript::encode_history(&map)?)
}
