use std::fmt::Write as _;
use std::io::Write as _;

use bayan_core::models::action::{Action, ActionKind};
use bayan_core::models::locale::Locale;
use bayan_core::models::message::{Message, Role};
use bayan_widget::error::WidgetError;
use bayan_widget::navigator::Navigator;
use jiff::tz::TimeZone;
use uuid::Uuid;

pub const HELP: &str = "\
commands:
  <text>          send a message
  /open           open the chat panel
  /close          close the chat panel
  /toggle         press the chat button
  /locale <ar|en> switch language
  /quick [N]      list quick replies, or send number N
  /act N          follow action N of the latest reply
  /state          print the widget snapshot as JSON
  /help           show this help
  /quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Open,
    Close,
    Toggle,
    Locale(Locale),
    Quick(Option<usize>),
    Act(usize),
    State,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// Indices typed by the user are 1-based; the returned ones are 0-based.
pub fn parse_command(line: &str) -> eyre::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    let command = match (name.as_str(), arg) {
        ("open", None) => Command::Open,
        ("close", None) => Command::Close,
        ("toggle", None) => Command::Toggle,
        ("state", None) => Command::State,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        ("locale", Some(tag)) => Command::Locale(tag.parse()?),
        ("quick", None) => Command::Quick(None),
        ("quick", Some(n)) => Command::Quick(Some(parse_index(n)?)),
        ("act", Some(n)) => Command::Act(parse_index(n)?),
        ("locale" | "act", None) => return Err(eyre::eyre!("/{name} needs an argument")),
        _ => return Err(eyre::eyre!("unknown command: {line} (try /help)")),
    };
    Ok(Some(command))
}

fn parse_index(raw: &str) -> eyre::Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(eyre::eyre!("expected a number from 1, got {raw}")),
    }
}

/// Actions offered by the newest assistant message.
pub fn latest_actions(messages: &[Message]) -> &[Action] {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.actions.as_slice())
        .unwrap_or_default()
}

/// Tracks which messages have already been printed.
#[derive(Debug, Default)]
pub struct Printer {
    last_seen: Option<Uuid>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages appended since the previous call.
    ///
    /// If the last printed message is gone (locale switch or eviction) the
    /// whole transcript counts as new.
    pub fn fresh<'m>(&mut self, messages: &'m [Message]) -> &'m [Message] {
        let start = self
            .last_seen
            .and_then(|id| messages.iter().position(|m| m.id == id))
            .map(|i| i + 1)
            .unwrap_or(0);
        if let Some(last) = messages.last() {
            self.last_seen = Some(last.id);
        }
        &messages[start..]
    }

    /// Forget what was printed so the next call replays everything.
    pub fn reset(&mut self) {
        self.last_seen = None;
    }
}

/// One message as terminal text, actions numbered for `/act`.
pub fn render(message: &Message) -> String {
    let time = message.timestamp.to_zoned(TimeZone::system());
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "bayan",
    };

    let mut out = format!("[{}] {who}: {}", time.strftime("%H:%M"), message.content);
    for (i, action) in message.actions.iter().enumerate() {
        let marker = match action.kind {
            ActionKind::Internal => "→",
            ActionKind::Whatsapp => "↗",
        };
        let _ = write!(out, "\n    {}. {marker} {}", i + 1, action.label);
    }
    out
}

/// Navigator for a terminal host: navigation is reported, not performed.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl TerminalNavigator {
    fn report(&self, verb: &str, href: &str) -> Result<(), WidgetError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "  ({verb} {href})").map_err(|e| WidgetError::Navigation {
            href: href.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, href: &str) -> Result<(), WidgetError> {
        tracing::info!(%href, "navigate");
        self.report("navigating to", href)
    }

    fn open_external(&self, href: &str) -> Result<(), WidgetError> {
        tracing::info!(%href, "open external");
        self.report("opening", href)
    }
}
