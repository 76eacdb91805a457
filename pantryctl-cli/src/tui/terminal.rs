//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pantryctl_core::{
    ActionKind, ActionRequest, Advisor, Ledger, PantryConfig, PantryError, Suggestion,
    TemplateAdvisor,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::app::{App, Dispatch};
use super::commands::{self, AddArgs, Command, ParseResult};
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Advisor result tagged with the dispatch ticket
type Completion = (u64, pantryctl_core::Result<Suggestion>);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: PantryConfig) -> Result<()> {
    let advisor: Arc<dyn Advisor> = Arc::new(TemplateAdvisor::from_config(&config.advisor));
    let mut app = App::new(Ledger::new(), config);
    info!("tui session started");

    let mut terminal = init_terminal()?;

    let result = run_loop(&mut terminal, &mut app, advisor).await;

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;
    info!(purchases = app.ledger.len(), "tui session ended");

    result
}

/// Main event loop
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    advisor: Arc<dyn Advisor>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    loop {
        drain_completions(app, &mut rx);

        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            break;
        }

        // Poll for events (with 100ms timeout so finished actions show up)
        let Some(event) = poll_event(Duration::from_millis(100))? else {
            continue;
        };

        let Event::Key(key) = event else {
            // Resize is handled on next draw
            continue;
        };

        // Overlays swallow the next key
        if app.alert.is_some() {
            app.dismiss_alert();
            continue;
        }
        if app.help_text.is_some() {
            app.dismiss_help();
            continue;
        }

        match handle_key(app, key) {
            HandleResult::Quit => break,
            HandleResult::Continue => {}
            HandleResult::Submit => {
                let line = app.take_scratch();
                execute_scratch(app, &line, &advisor, &tx);
            }
            HandleResult::Trigger(request) => trigger(app, request, &advisor, &tx),
            HandleResult::ShowHelp => app.show_help(commands::get_help_text()),
        }
    }

    Ok(())
}

/// Apply every finished action without blocking
fn drain_completions(app: &mut App, rx: &mut UnboundedReceiver<Completion>) {
    while let Ok((ticket, result)) = rx.try_recv() {
        app.complete(ticket, result);
    }
}

/// Prepare an action on the UI task and hand it to the advisor in the background
fn trigger(
    app: &mut App,
    request: ActionRequest,
    advisor: &Arc<dyn Advisor>,
    tx: &UnboundedSender<Completion>,
) {
    let Some(Dispatch { ticket, action }) = app.dispatch(request) else {
        return;
    };

    let advisor = Arc::clone(advisor);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = advisor.respond(action).await;
        if tx.send((ticket, result)).is_err() {
            debug!(ticket, "ui closed before result arrived");
        }
    });
}

/// Execute a scratch line
fn execute_scratch(
    app: &mut App,
    line: &str,
    advisor: &Arc<dyn Advisor>,
    tx: &UnboundedSender<Completion>,
) {
    let command = match commands::parse_scratch(line) {
        ParseResult::Command(cmd) => cmd,
        ParseResult::Text(text) if text.is_empty() => return,
        ParseResult::Text(text) => Command::Add(AddArgs::parse(&text)),
        ParseResult::Incomplete => {
            app.set_status("Type a command after /  (/help lists them)");
            return;
        }
    };

    match command {
        Command::Add(args) => match args.into_purchase(&app.config.ledger) {
            Ok(purchase) => {
                app.add_purchase(purchase);
            }
            Err(err) => app.show_error(&PantryError::from(err)),
        },
        Command::Alternatives { item } => {
            trigger(app, ActionRequest::HealthyAlternatives { item }, advisor, tx)
        }
        Command::Shop { items } => trigger(app, ActionRequest::ShoppingList { items }, advisor, tx),
        Command::Action(kind) => {
            if let Some(request) = history_request(kind) {
                trigger(app, request, advisor, tx);
            }
        }
        Command::Stats => {
            let summary = app.stats_summary();
            app.show_info("📊 Purchase Stats", summary);
        }
        Command::Help => app.show_help(commands::get_help_text()),
        Command::Clear => {
            app.clear_scratch();
            app.clear_status();
        }
        Command::Quit => app.should_quit = true,
        Command::Unknown { cmd, .. } => {
            app.set_status(format!("Unknown command: /{}", cmd));
        }
    }
}

/// Requests for actions that take no input besides the ledger
fn history_request(kind: ActionKind) -> Option<ActionRequest> {
    match kind {
        ActionKind::PredictMissing => Some(ActionRequest::PredictMissing),
        ActionKind::ExpiringItems => Some(ActionRequest::ExpiringItems),
        ActionKind::MealIdeas => Some(ActionRequest::MealIdeas),
        ActionKind::SpendingAnalysis => Some(ActionRequest::SpendingAnalysis),
        ActionKind::HealthyAlternatives | ActionKind::ShoppingList => None,
    }
}
