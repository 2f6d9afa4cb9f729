use std::sync::Arc;

use bayan_console::config::{self, ConsoleConfig};
use bayan_console::repl::{self, Command, Printer, TerminalNavigator};
use bayan_widget::widget::{ChatWidget, DispatchOutcome, SendOutcome};
use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let mut config = config::load_or_init_config()?;
    config.apply_env(|key| std::env::var(key).ok())?;
    init_tracing(&config);

    let store = config.history_store()?;
    tracing::info!(path = %store.path().display(), "using history file");

    let widget = Arc::new(
        ChatWidget::new(
            config.locale,
            config.reply_mode()?,
            Arc::new(store),
            Arc::new(TerminalNavigator),
        )
        .with_typing_delay(config.typing_delay()),
    );

    run(widget).await
}

fn init_tracing(config: &ConsoleConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(widget: Arc<ChatWidget>) -> Result<()> {
    println!("{}", repl::HELP);

    let mut printer = Printer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SendOutcome>();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match repl::parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                if command == Command::Quit {
                    break;
                }
                handle(&widget, command, &mut printer, &done_tx).await?;
            }
            Some(outcome) = done_rx.recv() => {
                if let SendOutcome::Rejected(reason) = outcome {
                    println!("not sent: {reason:?}");
                }
                print_fresh(&widget, &mut printer).await;
            }
        }
    }

    Ok(())
}

async fn handle(
    widget: &Arc<ChatWidget>,
    command: Command,
    printer: &mut Printer,
    done: &mpsc::UnboundedSender<SendOutcome>,
) -> Result<()> {
    match command {
        Command::Say(text) => spawn_send(widget, done, move |w| async move { w.send(&text).await }),
        Command::Quick(Some(index)) => {
            spawn_send(widget, done, move |w| async move { w.send_quick_reply(index).await })
        }
        Command::Quick(None) => {
            let snapshot = widget.snapshot().await;
            for (i, quick) in snapshot.quick_replies.iter().enumerate() {
                println!("  {}. {quick}", i + 1);
            }
        }
        Command::Open => {
            if !widget.phase().await.is_open() {
                widget.toggle().await;
            }
            settle(widget, printer).await;
        }
        Command::Close => {
            widget.close().await;
            settle(widget, printer).await;
        }
        Command::Toggle => {
            widget.toggle().await;
            settle(widget, printer).await;
        }
        Command::Locale(locale) => {
            widget.set_locale(locale).await;
            printer.reset();
            print_fresh(widget, printer).await;
        }
        Command::Act(index) => {
            let snapshot = widget.snapshot().await;
            let Some(action) = repl::latest_actions(&snapshot.messages).get(index).cloned()
            else {
                println!("no action {}", index + 1);
                return Ok(());
            };
            match widget.dispatch(&action).await {
                Ok(DispatchOutcome::Navigated) => println!("  (chat closed)"),
                Ok(DispatchOutcome::Rejected) => println!("open the chat first (/open)"),
                Ok(DispatchOutcome::Ignored | DispatchOutcome::OpenedExternal) => {}
                Err(e) => println!("{e}"),
            }
        }
        Command::State => {
            let snapshot = widget.snapshot().await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Help => println!("{}", repl::HELP),
        Command::Quit => {}
    }
    Ok(())
}

fn spawn_send<F, Fut>(widget: &Arc<ChatWidget>, done: &mpsc::UnboundedSender<SendOutcome>, f: F)
where
    F: FnOnce(Arc<ChatWidget>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = SendOutcome> + Send + 'static,
{
    let widget = Arc::clone(widget);
    let done = done.clone();
    tokio::spawn(async move {
        let outcome = f(widget).await;
        let _ = done.send(outcome);
    });
}

/// Run the open/close animation and report where it landed.
async fn settle(widget: &ChatWidget, printer: &mut Printer) {
    let phase = widget.animate().await;
    let snapshot = widget.snapshot().await;
    println!("  [{phase:?}] unread: {}", snapshot.unread_count);
    if phase.is_interactive() {
        print_fresh(widget, printer).await;
    }
}

async fn print_fresh(widget: &ChatWidget, printer: &mut Printer) {
    let snapshot = widget.snapshot().await;
    if !snapshot.is_open {
        return;
    }
    for message in printer.fresh(&snapshot.messages) {
        println!("{}", repl::render(message));
    }
}
