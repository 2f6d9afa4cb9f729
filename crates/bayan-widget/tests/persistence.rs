mod common;

use std::sync::Arc;
use std::time::Duration;

use bayan_assistant::replies;
use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;
use bayan_core::models::transcript::{HistoryMap, MAX_HISTORY};
use bayan_storage::memory::MemoryStore;
use bayan_storage::store::HistoryStore;
use bayan_widget::widget::{ChatWidget, ReplyMode, SendOutcome};
use common::{BrokenStore, HoldingStore, RecordingNavigator, harness, harness_with_store, open};

#[tokio::test]
async fn corrupt_storage_yields_single_greeting() {
    let store = Arc::new(MemoryStore::with_raw(r#"{"en": [{"id": 42"#));
    let h = harness_with_store(Locale::En, ReplyMode::RuleBased, store);

    let snapshot = h.widget.snapshot().await;
    assert_eq!(snapshot.messages.len(), 1);
    assert_eq!(snapshot.messages[0].content, replies::greeting(Locale::En));
    assert!(snapshot.messages[0].actions.is_empty());
}

#[tokio::test]
async fn history_is_restored_on_construction() {
    let store = Arc::new(MemoryStore::new());
    let saved = vec![
        Message::assistant("earlier greeting", Vec::new()),
        Message::user("earlier question"),
    ];
    store.put(Locale::En, &saved).unwrap();

    let h = harness_with_store(Locale::En, ReplyMode::RuleBased, store);
    assert_eq!(h.widget.snapshot().await.messages, saved);
}

#[tokio::test(start_paused = true)]
async fn history_survives_widget_teardown() {
    let h = harness(Locale::En, ReplyMode::RuleBased);
    open(&h.widget).await;
    h.widget.send("Do you build online stores?").await;
    let before = h.widget.snapshot().await.messages;
    drop(h.widget);

    let again = harness_with_store(Locale::En, ReplyMode::RuleBased, h.store);
    assert_eq!(again.widget.snapshot().await.messages, before);
}

#[tokio::test(start_paused = true)]
async fn locales_keep_separate_conversations() {
    let h = harness(Locale::En, ReplyMode::RuleBased);
    open(&h.widget).await;
    h.widget.send("How much is a landing page?").await;

    h.widget.set_locale(Locale::Ar).await;
    let arabic = h.widget.snapshot().await;
    assert_eq!(arabic.locale, Locale::Ar);
    assert_eq!(arabic.messages.len(), 1);
    assert_eq!(arabic.messages[0].content, replies::greeting(Locale::Ar));

    h.widget.send("كم سعر المتجر؟").await;
    assert_eq!(h.store.get(Locale::Ar).unwrap().len(), 3);

    h.widget.set_locale(Locale::En).await;
    assert_eq!(h.widget.snapshot().await.messages.len(), 3);
    assert_eq!(h.store.get(Locale::En).unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn broken_storage_never_blocks_the_widget() {
    let widget = ChatWidget::new(
        Locale::En,
        ReplyMode::RuleBased,
        Arc::new(BrokenStore),
        Arc::new(RecordingNavigator::default()),
    );
    assert_eq!(widget.snapshot().await.messages.len(), 1);

    open(&widget).await;
    assert_eq!(widget.send("pricing please").await, SendOutcome::Accepted);
    assert_eq!(widget.snapshot().await.messages.len(), 3);
}

#[tokio::test]
async fn oversized_stored_history_is_capped_on_restore() {
    let messages: Vec<Message> = (0..MAX_HISTORY + 10)
        .map(|i| Message::user(i.to_string()))
        .collect();
    let mut map = HistoryMap::new();
    map.insert(Locale::En, messages);
    let raw = serde_json::to_vec(&map).unwrap();

    let store = Arc::new(MemoryStore::with_raw(raw));
    let h = harness_with_store(Locale::En, ReplyMode::RuleBased, store);
    let restored = h.widget.snapshot().await.messages;
    assert_eq!(restored.len(), MAX_HISTORY);
    assert_eq!(restored[0].content, "10");
    assert_eq!(restored.last().unwrap().content, (MAX_HISTORY + 9).to_string());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn history_is_written_without_holding_the_widget_lock() {
    let (entered_tx, entered_rx) = std::sync::mpsc::channel();
    let (release_tx, release_rx) = std::sync::mpsc::channel();
    let widget = Arc::new(
        ChatWidget::new(
            Locale::En,
            ReplyMode::RuleBased,
            Arc::new(HoldingStore::new(entered_tx, release_rx)),
            Arc::new(RecordingNavigator::default()),
        )
        .with_typing_delay(Duration::ZERO),
    );
    open(&widget).await;

    let sender = widget.clone();
    let send = tokio::spawn(async move { sender.send("hello").await });

    // The visitor message is being written; the widget must stay readable.
    let entered_rx = tokio::task::spawn_blocking(move || {
        entered_rx.recv().unwrap();
        entered_rx
    })
    .await
    .unwrap();
    let snapshot = tokio::time::timeout(Duration::from_secs(5), widget.snapshot())
        .await
        .expect("state lock held during a store write");
    assert!(snapshot.messages.last().unwrap().is_user());

    release_tx.send(()).unwrap();
    release_tx.send(()).unwrap();
    assert_eq!(send.await.unwrap(), SendOutcome::Accepted);
    drop(entered_rx);
    assert_eq!(widget.snapshot().await.messages.len(), 3);
}
