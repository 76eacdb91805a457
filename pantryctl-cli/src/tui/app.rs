//! Core application state and mode management

use chrono::Utc;
use pantryctl_core::{
    ActionKind, ActionRequest, Ledger, NewPurchase, PantryConfig, PantryError, PreparedAction,
    PurchaseRecord, Suggestion,
};
use tracing::{debug, warn};

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation mode - move through history, trigger actions
    #[default]
    Normal,
    /// Edit mode - typing in the scratch command line
    Edit,
}

/// State of one assistant result panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Idle,
    /// Waiting on the dispatch with this ticket
    Loading { ticket: u64 },
    Ready(Suggestion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

/// Blocking popup; any key dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

/// A prepared action ready to be handed to the advisor
#[derive(Debug)]
pub struct Dispatch {
    pub ticket: u64,
    pub action: PreparedAction,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current input mode
    pub mode: Mode,
    /// Purchase history for this session
    pub ledger: Ledger,
    pub config: PantryConfig,
    /// Scratch pane text content
    pub scratch_content: String,
    /// Scratch cursor position (byte offset, always on a char boundary)
    pub scratch_cursor: usize,
    /// Selected row in the history list
    pub selected_index: usize,
    /// Result panel shown in the main area
    pub active_panel: ActionKind,
    /// One panel per action, indexed by `ActionKind::index`
    pub panels: [PanelState; 6],
    pub alert: Option<Alert>,
    pub help_text: Option<&'static str>,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    pub should_quit: bool,
    next_ticket: u64,
}

impl App {
    pub fn new(ledger: Ledger, config: PantryConfig) -> Self {
        Self {
            mode: Mode::Normal,
            ledger,
            config,
            scratch_content: String::new(),
            scratch_cursor: 0,
            selected_index: 0,
            active_panel: ActionKind::PredictMissing,
            panels: std::array::from_fn(|_| PanelState::Idle),
            alert: None,
            help_text: None,
            status_message: None,
            should_quit: false,
            next_ticket: 1,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Enter edit mode for scratch pane
    pub fn enter_scratch_edit(&mut self) {
        self.mode = Mode::Edit;
    }

    /// Enter edit mode with the scratch line replaced by `prefix`
    pub fn enter_scratch_with(&mut self, prefix: &str) {
        self.scratch_content = prefix.to_string();
        self.scratch_cursor = self.scratch_content.len();
        self.mode = Mode::Edit;
    }

    /// Exit current mode back to normal
    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn show_help(&mut self, text: &'static str) {
        self.help_text = Some(text);
    }

    pub fn dismiss_help(&mut self) {
        self.help_text = None;
    }

    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Alert {
            level: AlertLevel::Info,
            title: title.into(),
            message: message.into(),
        });
    }

    /// Show a user-facing error as an alert and log it
    pub fn show_error(&mut self, err: &PantryError) {
        warn!("{}", err);
        let title = match err {
            PantryError::Validation(_) => "Invalid input",
            PantryError::Precondition { .. } => "Not yet",
            _ => "Error",
        };
        self.alert = Some(Alert {
            level: AlertLevel::Error,
            title: title.to_string(),
            message: err.to_string(),
        });
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Select next purchase in the history list
    pub fn select_next(&mut self) {
        let len = self.ledger.len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    /// Select previous purchase in the history list
    pub fn select_prev(&mut self) {
        let len = self.ledger.len();
        if len > 0 {
            self.selected_index = self
                .selected_index
                .checked_sub(1)
                .unwrap_or(len - 1);
        }
    }

    pub fn selected_record(&self) -> Option<&PurchaseRecord> {
        self.ledger.list().get(self.selected_index)
    }

    pub fn select_panel(&mut self, kind: ActionKind) {
        self.active_panel = kind;
    }

    pub fn panel(&self, kind: ActionKind) -> &PanelState {
        &self.panels[kind.index()]
    }

    /// Add text to scratch pane
    pub fn scratch_insert(&mut self, c: char) {
        self.scratch_content.insert(self.scratch_cursor, c);
        self.scratch_cursor += c.len_utf8();
    }

    /// Delete char before cursor in scratch
    pub fn scratch_backspace(&mut self) {
        if let Some((idx, _)) = self.scratch_content[..self.scratch_cursor].char_indices().last() {
            self.scratch_content.remove(idx);
            self.scratch_cursor = idx;
        }
    }

    pub fn scratch_left(&mut self) {
        if let Some((idx, _)) = self.scratch_content[..self.scratch_cursor].char_indices().last() {
            self.scratch_cursor = idx;
        }
    }

    pub fn scratch_right(&mut self) {
        if let Some(c) = self.scratch_content[self.scratch_cursor..].chars().next() {
            self.scratch_cursor += c.len_utf8();
        }
    }

    pub fn scratch_home(&mut self) {
        self.scratch_cursor = 0;
    }

    pub fn scratch_end(&mut self) {
        self.scratch_cursor = self.scratch_content.len();
    }

    pub fn clear_scratch(&mut self) {
        self.scratch_content.clear();
        self.scratch_cursor = 0;
    }

    /// Take the scratch line for execution, leaving it empty
    pub fn take_scratch(&mut self) -> String {
        self.scratch_cursor = 0;
        std::mem::take(&mut self.scratch_content)
    }

    /// Record a purchase; success or failure is reported through an alert
    pub fn add_purchase(&mut self, purchase: NewPurchase) -> bool {
        match self.ledger.record_purchase(purchase) {
            Ok(record) => {
                let message = format!("✓ {} added to purchase history!", record.name);
                self.selected_index = self.ledger.len() - 1;
                self.show_info("Purchase logged", message);
                true
            }
            Err(err) => {
                self.show_error(&err);
                false
            }
        }
    }

    /// Check preconditions and mark the panel as loading.
    ///
    /// Returns `None` (with an alert shown) when the action cannot run. The
    /// ledger is only read here; the returned action carries its own snapshot.
    pub fn dispatch(&mut self, request: ActionRequest) -> Option<Dispatch> {
        let kind = request.kind();
        match request.prepare(&self.ledger, &self.config.advisor) {
            Ok(action) => {
                let ticket = self.next_ticket;
                self.next_ticket += 1;
                self.panels[kind.index()] = PanelState::Loading { ticket };
                self.active_panel = kind;
                self.set_status(kind.loading_message());
                debug!(action = kind.slug(), ticket, "action dispatched");
                Some(Dispatch { ticket, action })
            }
            Err(err) => {
                self.show_error(&err);
                None
            }
        }
    }

    /// Apply an advisor result; results for a superseded ticket are dropped
    pub fn complete(&mut self, ticket: u64, result: pantryctl_core::Result<Suggestion>) {
        let kind = match &result {
            Ok(suggestion) => suggestion.kind,
            Err(_) => match self.loading_kind(ticket) {
                Some(kind) => kind,
                None => return,
            },
        };

        let slot = &mut self.panels[kind.index()];
        if *slot != (PanelState::Loading { ticket }) {
            debug!(action = kind.slug(), ticket, "stale result dropped");
            return;
        }

        match result {
            Ok(suggestion) => {
                debug!(action = kind.slug(), ticket, "action completed");
                *slot = PanelState::Ready(suggestion);
                self.set_status(format!("{} ready", kind.title()));
            }
            Err(err) => {
                *slot = PanelState::Idle;
                self.clear_status();
                self.show_error(&err);
            }
        }
    }

    fn loading_kind(&self, ticket: u64) -> Option<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| self.panels[kind.index()] == PanelState::Loading { ticket })
    }

    /// Number of actions still waiting on the advisor
    pub fn pending_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|p| matches!(p, PanelState::Loading { .. }))
            .count()
    }

    /// One-paragraph summary for `/stats`
    pub fn stats_summary(&self) -> String {
        let stats = self
            .ledger
            .statistics(self.config.advisor.expiring_threshold_days, Utc::now());
        format!(
            "Purchases: {}\nItems: {}\nCategories: {}\n\nFresh: {}\nExpiring soon: {}\nExpired: {}",
            stats.total_records,
            stats.total_quantity,
            stats.categories,
            stats.fresh,
            stats.expiring,
            stats.expired
        )
    }
}
