//! Fakes shared by the widget tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bayan_assistant::completion::{CompletionClient, CompletionRequest};
use bayan_assistant::error::AssistantError;
use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;
use bayan_storage::error::StorageError;
use bayan_storage::memory::MemoryStore;
use bayan_storage::store::HistoryStore;
use bayan_widget::error::WidgetError;
use bayan_widget::navigator::Navigator;
use bayan_widget::widget::{ChatWidget, ReplyMode};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    Internal(String),
    External(String),
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: Mutex<Vec<Visit>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, href: &str) -> Result<(), WidgetError> {
        self.visits
            .lock()
            .unwrap()
            .push(Visit::Internal(href.to_string()));
        Ok(())
    }

    fn open_external(&self, href: &str) -> Result<(), WidgetError> {
        self.visits
            .lock()
            .unwrap()
            .push(Visit::External(href.to_string()));
        Ok(())
    }
}

/// Completion client that waits for `release` and then answers with
/// `reply`, or fails when `reply` is `None`.
pub struct GatedClient {
    pub release: Notify,
    pub reply: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl GatedClient {
    pub fn answering(reply: &str) -> Self {
        Self {
            release: Notify::new(),
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            release: Notify::new(),
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionClient for GatedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        self.requests.lock().unwrap().push(request.clone());
        self.release.notified().await;
        self.reply
            .clone()
            .ok_or_else(|| AssistantError::Transport("connection refused".to_string()))
    }
}

/// Completion client that answers immediately.
pub struct InstantClient(pub Result<String, u16>);

#[async_trait]
impl CompletionClient for InstantClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, AssistantError> {
        self.0
            .clone()
            .map_err(|status| AssistantError::Status { status })
    }
}

/// Store whose every operation fails.
pub struct BrokenStore;

impl HistoryStore for BrokenStore {
    fn get(&self, _locale: Locale) -> Result<Vec<Message>, StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn put(&self, _locale: Locale, _messages: &[Message]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

/// Store whose writes wait for the test to release them, reporting each
/// write as it starts.
pub struct HoldingStore {
    inner: MemoryStore,
    entered: Mutex<std::sync::mpsc::Sender<()>>,
    release: Mutex<std::sync::mpsc::Receiver<()>>,
}

impl HoldingStore {
    pub fn new(
        entered: std::sync::mpsc::Sender<()>,
        release: std::sync::mpsc::Receiver<()>,
    ) -> Self {
        Self {
            inner: MemoryStore::new(),
            entered: Mutex::new(entered),
            release: Mutex::new(release),
        }
    }
}

impl HistoryStore for HoldingStore {
    fn get(&self, locale: Locale) -> Result<Vec<Message>, StorageError> {
        self.inner.get(locale)
    }

    fn put(&self, locale: Locale, messages: &[Message]) -> Result<(), StorageError> {
        let _ = self.entered.lock().unwrap().send(());
        let _ = self.release.lock().unwrap().recv();
        self.inner.put(locale, messages)
    }
}

pub struct Harness {
    pub widget: Arc<ChatWidget>,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(locale: Locale, mode: ReplyMode) -> Harness {
    harness_with_store(locale, mode, Arc::new(MemoryStore::new()))
}

pub fn harness_with_store(locale: Locale, mode: ReplyMode, store: Arc<MemoryStore>) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let widget = Arc::new(ChatWidget::new(
        locale,
        mode,
        store.clone(),
        navigator.clone(),
    ));
    Harness {
        widget,
        store,
        navigator,
    }
}

/// Open the widget and finish the animation.
pub async fn open(widget: &ChatWidget) {
    widget.toggle().await;
    widget.settle().await;
}

/// Yield until a send has appended its visitor message and is waiting
/// for the reply.
pub async fn wait_for_in_flight(widget: &ChatWidget) {
    loop {
        let snapshot = widget.snapshot().await;
        let last_is_user = snapshot.messages.last().is_some_and(|m| m.is_user());
        if snapshot.reply_in_flight && last_is_user {
            return;
        }
        tokio::task::yield_now().await;
    }
}
