//! The chat widget session.
//!
//! A [`ChatWidget`] owns one transcript per locale and brokers between
//! visitor input and whichever reply path it was built with. At most one
//! reply is pending at a time: a send made while one is in flight is
//! rejected, so replies can never interleave.
//!
//! Every transcript mutation is written through the injected
//! [`HistoryStore`]. Writes are best-effort; a failing store is logged and
//! otherwise ignored.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bayan_assistant::classify::classify;
use bayan_assistant::completion::{CompletionClient, CompletionRequest};
use bayan_assistant::replies;
use bayan_core::models::action::{Action, ActionKind};
use bayan_core::models::locale::Locale;
use bayan_core::models::message::Message;
use bayan_core::models::transcript::Transcript;
use bayan_storage::store::HistoryStore;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::WidgetError;
use crate::navigator::Navigator;
use crate::phase::{TRANSITION_DELAY, WidgetPhase};

/// Pause before a rule-based reply appears, so it reads as typed.
pub const TYPING_DELAY: Duration = Duration::from_millis(600);

/// Where replies come from. Chosen once, when the widget is built.
#[derive(Clone)]
pub enum ReplyMode {
    /// Local keyword classification and the canned reply table.
    RuleBased,
    /// Remote completion endpoint.
    Ai(Arc<dyn CompletionClient>),
}

impl fmt::Debug for ReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyMode::RuleBased => f.write_str("RuleBased"),
            ReplyMode::Ai(_) => f.write_str("Ai"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing left after trimming.
    Empty,
    /// A reply to an earlier send has not arrived yet.
    ReplyInFlight,
    /// The widget is not open.
    NotInteractive,
    /// No quick reply at that position.
    UnknownQuickReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The visitor message was appended and its reply has arrived.
    Accepted,
    /// Nothing was appended.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Navigated in-app; the widget is now closed.
    Navigated,
    /// Opened an external link; widget state untouched.
    OpenedExternal,
    /// The action has no target.
    Ignored,
    /// The widget is not open.
    Rejected,
}

/// Everything a host needs to render the widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub locale: Locale,
    pub rtl: bool,
    pub phase: WidgetPhase,
    pub is_open: bool,
    pub is_mounted: bool,
    pub is_interactive: bool,
    /// Replies that arrived while the widget was not fully `Open`. Counted
    /// during `Opening` too, even though `is_open` is already true.
    pub unread_count: u32,
    pub reply_in_flight: bool,
    /// Bumped on every append; hosts scroll to the newest message when it
    /// changes.
    pub scroll_revision: u64,
    pub messages: Vec<Message>,
    pub quick_replies: Vec<String>,
}

struct WidgetState {
    locale: Locale,
    transcripts: HashMap<Locale, Transcript>,
    phase: WidgetPhase,
    unread_count: u32,
    scroll_revision: u64,
    /// Bumped on every phase change so a stale animation timer can tell it
    /// has been superseded.
    transition: u64,
}

impl WidgetState {
    fn enter(&mut self, phase: WidgetPhase) -> WidgetPhase {
        if phase != self.phase {
            debug!(from = ?self.phase, to = ?phase, "widget transition");
            self.phase = phase;
            self.transition += 1;
            if phase == WidgetPhase::Open {
                self.unread_count = 0;
            }
        }
        self.phase
    }
}

/// Reply path chosen for one send, fixed before the state lock is released.
enum Pending<'a> {
    Rules,
    Remote(&'a dyn CompletionClient, CompletionRequest),
}

/// Clears the in-flight flag when a send finishes or is abandoned.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ChatWidget {
    state: Mutex<WidgetState>,
    in_flight: AtomicBool,
    mode: ReplyMode,
    store: Arc<dyn HistoryStore>,
    navigator: Arc<dyn Navigator>,
    typing_delay: Duration,
}

impl ChatWidget {
    /// Build a closed widget, restoring `locale`'s history from `store`.
    pub fn new(
        locale: Locale,
        mode: ReplyMode,
        store: Arc<dyn HistoryStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        info!(%locale, ?mode, "initializing chat widget");

        let transcript = restore(store.as_ref(), locale);
        let mut transcripts = HashMap::new();
        transcripts.insert(locale, transcript);

        Self {
            state: Mutex::new(WidgetState {
                locale,
                transcripts,
                phase: WidgetPhase::Closed,
                unread_count: 0,
                scroll_revision: 0,
                transition: 0,
            }),
            in_flight: AtomicBool::new(false),
            mode,
            store,
            navigator,
            typing_delay: TYPING_DELAY,
        }
    }

    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn mode(&self) -> &ReplyMode {
        &self.mode
    }

    pub async fn snapshot(&self) -> WidgetSnapshot {
        let mut state = self.state.lock().await;
        let locale = state.locale;
        let messages = self.transcript(&mut state, locale).messages().to_vec();

        WidgetSnapshot {
            locale,
            rtl: locale.is_rtl(),
            phase: state.phase,
            is_open: state.phase.is_open(),
            is_mounted: state.phase.is_mounted(),
            is_interactive: state.phase.is_interactive(),
            unread_count: state.unread_count,
            reply_in_flight: self.in_flight.load(Ordering::Acquire),
            scroll_revision: state.scroll_revision,
            messages,
            quick_replies: replies::quick_replies(locale)
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }

    pub async fn phase(&self) -> WidgetPhase {
        self.state.lock().await.phase
    }

    pub async fn locale(&self) -> Locale {
        self.state.lock().await.locale
    }

    /// Switch to another locale's conversation. The previous locale's
    /// history is kept as-is.
    pub async fn set_locale(&self, locale: Locale) {
        let mut state = self.state.lock().await;
        if state.locale == locale {
            return;
        }
        self.transcript(&mut state, locale);
        state.locale = locale;
        state.scroll_revision += 1;
        info!(%locale, "switched widget locale");
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Open/close button. Toggling while closing cancels the close.
    pub async fn toggle(&self) -> WidgetPhase {
        let mut state = self.state.lock().await;
        let next = state.phase.toggled();
        state.enter(next)
    }

    /// Close button, Escape key, or navigation away.
    pub async fn close(&self) -> WidgetPhase {
        let mut state = self.state.lock().await;
        let next = state.phase.closed();
        state.enter(next)
    }

    /// End the running animation now.
    pub async fn settle(&self) -> WidgetPhase {
        let mut state = self.state.lock().await;
        let next = state.phase.settled();
        state.enter(next)
    }

    /// Wait out [`TRANSITION_DELAY`], then settle, unless another
    /// transition happened in the meantime.
    pub async fn animate(&self) -> WidgetPhase {
        let started = self.state.lock().await.transition;
        tokio::time::sleep(TRANSITION_DELAY).await;

        let mut state = self.state.lock().await;
        if state.transition != started {
            return state.phase;
        }
        let next = state.phase.settled();
        state.enter(next)
    }

    // ── Messaging ────────────────────────────────────────────────────────────

    /// Send visitor text and wait for the reply.
    ///
    /// The visitor message is appended and persisted before any reply is
    /// requested. Dropping the returned future abandons the reply and frees
    /// the widget for the next send.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Rejected(RejectReason::Empty);
        }

        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            debug!("send rejected: reply in flight");
            return SendOutcome::Rejected(RejectReason::ReplyInFlight);
        };

        let (locale, pending, saved) = {
            let mut state = self.state.lock().await;
            if !state.phase.is_interactive() {
                return SendOutcome::Rejected(RejectReason::NotInteractive);
            }

            let locale = state.locale;
            let transcript = self.transcript(&mut state, locale);
            transcript.push(Message::user(text));
            let saved = transcript.messages().to_vec();

            let pending = match &self.mode {
                ReplyMode::RuleBased => Pending::Rules,
                ReplyMode::Ai(client) => Pending::Remote(
                    client.as_ref(),
                    CompletionRequest::from_history(&saved, locale),
                ),
            };
            state.scroll_revision += 1;
            (locale, pending, saved)
        };
        self.persist(locale, &saved);

        let reply: Message = match pending {
            Pending::Rules => {
                tokio::time::sleep(self.typing_delay).await;
                let intent = classify(text, locale);
                replies::resolve(intent, locale).into()
            }
            Pending::Remote(client, request) => match client.complete(&request).await {
                Ok(text) => Message::assistant(text, Vec::new()),
                Err(e) => {
                    warn!(error = %e, %locale, "completion failed, replying with fallback");
                    replies::ai_failure(locale).into()
                }
            },
        };

        self.append_reply(locale, reply).await;
        SendOutcome::Accepted
    }

    /// Send the `index`th quick reply for the active locale.
    pub async fn send_quick_reply(&self, index: usize) -> SendOutcome {
        let locale = self.locale().await;
        match replies::quick_replies(locale).get(index) {
            Some(text) => self.send(text).await,
            None => SendOutcome::Rejected(RejectReason::UnknownQuickReply),
        }
    }

    async fn append_reply(&self, locale: Locale, reply: Message) {
        let saved = {
            let mut state = self.state.lock().await;
            let transcript = self.transcript(&mut state, locale);
            transcript.push(reply);
            let saved = transcript.messages().to_vec();

            if state.phase != WidgetPhase::Open {
                state.unread_count += 1;
            }
            state.scroll_revision += 1;
            saved
        };
        self.persist(locale, &saved);
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    /// Carry out a suggested action.
    ///
    /// Internal links navigate and close the widget; WhatsApp links open
    /// externally and leave the widget as it is.
    pub async fn dispatch(&self, action: &Action) -> Result<DispatchOutcome, WidgetError> {
        if !self.phase().await.is_interactive() {
            return Ok(DispatchOutcome::Rejected);
        }

        let Some(href) = action.href.as_deref() else {
            debug!(label = %action.label, "ignoring action without href");
            return Ok(DispatchOutcome::Ignored);
        };

        match action.kind {
            ActionKind::Internal => {
                self.navigator.navigate(href)?;
                let mut state = self.state.lock().await;
                state.enter(WidgetPhase::Closed);
                Ok(DispatchOutcome::Navigated)
            }
            ActionKind::Whatsapp => {
                self.navigator.open_external(href)?;
                Ok(DispatchOutcome::OpenedExternal)
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────────────

    /// The transcript for `locale`, restoring it on first use.
    fn transcript<'s>(&self, state: &'s mut WidgetState, locale: Locale) -> &'s mut Transcript {
        state
            .transcripts
            .entry(locale)
            .or_insert_with(|| restore(self.store.as_ref(), locale))
    }

    /// Write `messages` through the store. Callers release the state lock
    /// first; stores may block on I/O.
    fn persist(&self, locale: Locale, messages: &[Message]) {
        if let Err(e) = self.store.put(locale, messages) {
            warn!(error = %e, %locale, "failed to persist chat history");
        }
    }
}

/// Load `locale`'s history, or start a fresh conversation with a greeting
/// when nothing usable is stored.
fn restore(store: &dyn HistoryStore, locale: Locale) -> Transcript {
    match store.get(locale) {
        Ok(messages) if !messages.is_empty() => {
            info!(%locale, count = messages.len(), "restored chat history");
            Transcript::from_messages(messages)
        }
        Ok(_) => {
            info!(%locale, "no chat history, starting fresh");
            greeting(locale)
        }
        Err(e) => {
            warn!(error = %e, %locale, "unreadable chat history, starting fresh");
            greeting(locale)
        }
    }
}

fn greeting(locale: Locale) -> Transcript {
    let mut transcript = Transcript::new();
    transcript.push(Message::assistant(replies::greeting(locale), Vec::new()));
    transcript
}
