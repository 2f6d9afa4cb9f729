use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;
use bayan_storage::error::StorageError;
use bayan_storage::file::{FileStore, history_file_name};
use bayan_storage::store::HistoryStore;

#[test]
fn missing_file_is_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::in_dir(dir.path());
    assert!(store.get(Locale::En).unwrap().is_empty());
}

#[test]
fn round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::in_dir(dir.path().join("nested"));

    let message = Message::assistant("Hello", Vec::new());
    store.put(Locale::En, std::slice::from_ref(&message)).unwrap();

    // A second handle sees the same data.
    let reopened = FileStore::in_dir(dir.path().join("nested"));
    assert_eq!(reopened.get(Locale::En).unwrap(), vec![message]);
    assert!(reopened.get(Locale::Ar).unwrap().is_empty());
    let path = dir.path().join("nested").join("bayan.chat.history.json");
    assert_eq!(reopened.path(), path);
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn writing_one_locale_keeps_the_other() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::in_dir(dir.path());

    store.put(Locale::Ar, &[Message::user("أهلاً")]).unwrap();
    store.put(Locale::En, &[Message::user("hi")]).unwrap();

    assert_eq!(store.get(Locale::Ar).unwrap()[0].content, "أهلاً");
    assert_eq!(store.get(Locale::En).unwrap()[0].content, "hi");
}

#[test]
fn corrupt_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(history_file_name());
    std::fs::write(&path, "][").unwrap();

    let store = FileStore::at(&path);
    assert!(matches!(
        store.get(Locale::En),
        Err(StorageError::Corrupt(_))
    ));

    store.put(Locale::En, &[Message::user("recovered")]).unwrap();
    assert_eq!(store.get(Locale::En).unwrap()[0].content, "recovered");
}
