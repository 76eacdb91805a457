//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pantryctl_core::{ActionKind, ActionRequest};

use super::app::{App, Mode};
use super::commands::get_completions;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, PartialEq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Run the scratch line
    Submit,
    /// Dispatch an assistant action
    Trigger(ActionRequest),
    /// Show the help overlay
    ShowHelp,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return HandleResult::Continue;
    }

    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            _ => {}
        }
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Edit => handle_edit_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,
        KeyCode::Char('?') => HandleResult::ShowHelp,

        // History navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            HandleResult::Continue
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.selected_index = 0;
            HandleResult::Continue
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.selected_index = app.ledger.len().saturating_sub(1);
            HandleResult::Continue
        }

        // Scratch pane edit
        KeyCode::Char('i') | KeyCode::Enter => {
            app.enter_scratch_edit();
            HandleResult::Continue
        }
        KeyCode::Char('a') => {
            app.enter_scratch_with("/add ");
            HandleResult::Continue
        }
        KeyCode::Char('h') => {
            app.enter_scratch_with("/alt ");
            HandleResult::Continue
        }
        KeyCode::Char('s') => {
            app.enter_scratch_with("/shop ");
            HandleResult::Continue
        }

        // Actions that need nothing but the history
        KeyCode::Char('p') => HandleResult::Trigger(ActionRequest::PredictMissing),
        KeyCode::Char('e') => HandleResult::Trigger(ActionRequest::ExpiringItems),
        KeyCode::Char('m') => HandleResult::Trigger(ActionRequest::MealIdeas),
        KeyCode::Char('$') => HandleResult::Trigger(ActionRequest::SpendingAnalysis),

        // Result panels
        KeyCode::Char(c @ '1'..='6') => {
            let idx = (c as usize) - ('1' as usize);
            app.select_panel(ActionKind::ALL[idx]);
            HandleResult::Continue
        }
        KeyCode::Tab => {
            let next = (app.active_panel.index() + 1) % ActionKind::ALL.len();
            app.select_panel(ActionKind::ALL[next]);
            HandleResult::Continue
        }

        KeyCode::Esc => {
            app.clear_status();
            HandleResult::Continue
        }

        _ => HandleResult::Continue,
    }
}

/// Handle keys in edit mode (scratch pane)
fn handle_edit_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => {
            app.exit_mode();
            HandleResult::Continue
        }
        KeyCode::Enter => {
            app.exit_mode();
            HandleResult::Submit
        }
        KeyCode::Tab => {
            complete_command(app);
            HandleResult::Continue
        }
        KeyCode::Backspace => {
            app.scratch_backspace();
            HandleResult::Continue
        }
        KeyCode::Char(c) => {
            app.scratch_insert(c);
            HandleResult::Continue
        }
        KeyCode::Left => {
            app.scratch_left();
            HandleResult::Continue
        }
        KeyCode::Right => {
            app.scratch_right();
            HandleResult::Continue
        }
        KeyCode::Home => {
            app.scratch_home();
            HandleResult::Continue
        }
        KeyCode::End => {
            app.scratch_end();
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

/// Complete a partial `/command` when exactly one matches
fn complete_command(app: &mut App) {
    if !app.scratch_content.starts_with('/') || app.scratch_content.contains(' ') {
        return;
    }
    if let [only] = get_completions(&app.scratch_content)[..] {
        app.enter_scratch_with(&format!("{} ", only));
    }
}
