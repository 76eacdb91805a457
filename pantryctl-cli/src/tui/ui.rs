//! UI rendering using ratatui

use chrono::{DateTime, Local, Utc};
use pantryctl_core::{ActionKind, Freshness, PurchaseRecord};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{AlertLevel, App, Mode, PanelState};
use super::commands::get_completions;

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
const DANGER: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let now = Utc::now();

    // Main layout: scratch pane (left) + main area (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(main_chunks[0]);

    render_scratch_pane(frame, app, side_chunks[0]);
    render_selected(frame, app, side_chunks[1], now);

    // Main area: history + result tabs + result panel + status
    let main_area_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Purchase history
            Constraint::Length(3),      // Result tabs
            Constraint::Min(6),         // Result panel
            Constraint::Length(1),      // Status bar
        ])
        .split(main_chunks[1]);

    render_history(frame, app, main_area_chunks[0], now);
    render_tabs(frame, app, main_area_chunks[1]);
    render_panel(frame, app, main_area_chunks[2]);
    render_status_bar(frame, app, main_area_chunks[3]);

    if app.help_text.is_some() {
        render_help_overlay(frame, app);
    }
    if app.alert.is_some() {
        render_alert(frame, app);
    }
}

/// Render the scratch pane
fn render_scratch_pane(frame: &mut Frame, app: &App, area: Rect) {
    let is_editing = app.mode == Mode::Edit;

    let (title, color) = if is_editing {
        (" Scratch [EDIT] ", ACCENT)
    } else {
        (" Scratch ", SECONDARY)
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let content = if app.scratch_content.is_empty() && !is_editing {
        Text::from(vec![
            Line::from(Span::styled("Press 'i' to edit", Style::default().fg(DIM))),
            Line::from(""),
            Line::from(Span::styled("Commands:", Style::default().fg(DIM))),
            Line::from(Span::styled("  /add milk 2 5 $3.99", Style::default().fg(DIM))),
            Line::from(Span::styled("  /alt white rice", Style::default().fg(DIM))),
            Line::from(Span::styled("  /shop apples, milk", Style::default().fg(DIM))),
            Line::from(Span::styled("  /help or ?", Style::default().fg(DIM))),
        ])
    } else if is_editing {
        let before = &app.scratch_content[..app.scratch_cursor];
        let after = &app.scratch_content[app.scratch_cursor..];
        let mut lines = vec![Line::from(format!("{}|{}", before, after))];

        // Command hints while the first word is being typed
        if app.scratch_content.starts_with('/') && !app.scratch_content.contains(' ') {
            let completions = get_completions(&app.scratch_content);
            if !completions.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Completions (Tab):",
                    Style::default().fg(DIM),
                )));
                for comp in completions.iter().take(5) {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", comp),
                        Style::default().fg(ACCENT),
                    )));
                }
            }
        }
        Text::from(lines)
    } else {
        Text::from(app.scratch_content.as_str())
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Details of the highlighted purchase
fn render_selected(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let block = Block::default()
        .title(" Selected ")
        .title_style(Style::default().fg(SECONDARY))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let text = match app.selected_record() {
        Some(record) => {
            let price = match (record.unit_price, record.line_total()) {
                (Some(unit), Some(total)) => format!("${:.2} each, ${:.2} total", unit, total),
                _ => "no price".to_string(),
            };
            Text::from(vec![
                Line::from(Span::styled(
                    record.name.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Quantity: {}", record.quantity)),
                Line::from(format!("Category: {}", record.category)),
                Line::from(format!(
                    "Bought {} day(s) ago",
                    record.days_since_purchase(now)
                )),
                Line::from(format!(
                    "Expires {}",
                    record.expires_at.with_timezone(&Local).format("%b %e, %H:%M")
                )),
                Line::from(price),
            ])
        }
        None => Text::from(Span::styled(
            "Nothing logged yet",
            Style::default().fg(DIM),
        )),
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Render the purchase history list, newest at the bottom
fn render_history(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let records = app.ledger.list();
    let is_focused = app.mode == Mode::Normal;
    let border_color = if is_focused { ACCENT } else { SECONDARY };

    let block = Block::default()
        .title(format!(" 🛒 Purchase History ({}) ", records.len()))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if records.is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            "  No purchases yet. Press 'a' to log one.",
            Style::default().fg(DIM),
        )));
        frame.render_widget(List::new(vec![placeholder]).block(block), area);
        return;
    }

    let threshold = app.config.advisor.expiring_threshold_days;
    let items: Vec<ListItem> = records
        .iter()
        .map(|record| ListItem::new(history_line(record, now, threshold)))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn history_line(record: &PurchaseRecord, now: DateTime<Utc>, threshold: u32) -> Line<'static> {
    let freshness = record.freshness(now, threshold);
    let badge_color = match freshness {
        Freshness::Fresh => SUCCESS,
        Freshness::Expiring { days } if days < 0 => DANGER,
        Freshness::Expiring { .. } => HIGHLIGHT,
    };

    Line::from(vec![
        Span::raw(format!("{} (x{})", record.name, record.quantity)),
        Span::styled(
            format!(
                "  {}  {}  ",
                record.purchased_at.with_timezone(&Local).format("%Y-%m-%d"),
                record.category
            ),
            Style::default().fg(SECONDARY),
        ),
        Span::styled(
            format!("[{}]", freshness.badge()),
            Style::default().fg(badge_color),
        ),
    ])
}

fn tab_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::PredictMissing => "Predict",
        ActionKind::HealthyAlternatives => "Swaps",
        ActionKind::ExpiringItems => "Expiring",
        ActionKind::ShoppingList => "List",
        ActionKind::MealIdeas => "Meals",
        ActionKind::SpendingAnalysis => "Spending",
    }
}

/// Render the result panel tabs
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActionKind::ALL
        .iter()
        .enumerate()
        .map(|(idx, kind)| {
            let marker = match app.panel(*kind) {
                PanelState::Idle => "",
                PanelState::Loading { .. } => " ⏳",
                PanelState::Ready(_) => " •",
            };
            Line::from(format!("{}:{}{}", idx + 1, tab_label(*kind), marker))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Assistant ")
                .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .select(app.active_panel.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// Render the active result panel
fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let kind = app.active_panel;
    let (title, content, style) = match app.panel(kind) {
        PanelState::Idle => (
            format!(" {} ", kind.title()),
            idle_hint(kind).to_string(),
            Style::default().fg(DIM),
        ),
        PanelState::Loading { .. } => (
            format!(" {} ", kind.title()),
            kind.loading_message().to_string(),
            Style::default().fg(HIGHLIGHT),
        ),
        PanelState::Ready(suggestion) => (
            format!(
                " {} ({}) ",
                kind.title(),
                suggestion.rendered_at.with_timezone(&Local).format("%H:%M:%S")
            ),
            suggestion.text.clone(),
            Style::default().fg(Color::White),
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(SECONDARY))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(style);

    frame.render_widget(paragraph, area);
}

fn idle_hint(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::PredictMissing => "Press 'p' to predict what you're running low on.",
        ActionKind::HealthyAlternatives => "Press 'h' or type /alt <item> for healthier swaps.",
        ActionKind::ExpiringItems => "Press 'e' to check what expires soon.",
        ActionKind::ShoppingList => "Press 's' or type /shop <a, b, c> to organize a list.",
        ActionKind::MealIdeas => "Press 'm' for meal ideas from your groceries.",
        ActionKind::SpendingAnalysis => "Press '$' for spending by category (needs prices).",
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().bg(ACCENT).fg(Color::Black)),
        Mode::Edit => Span::styled(" EDIT ", Style::default().bg(SUCCESS).fg(Color::Black)),
    };

    let help_text = match app.mode {
        Mode::Normal => "a:add  p/e/m/$:ask  1-6:panel  j/k:nav  ?:help  q:quit",
        Mode::Edit => "Esc:exit  Enter:run  Tab:complete",
    };

    let pending = match app.pending_count() {
        0 => String::new(),
        n => format!(" [{} pending]", n),
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::styled(pending, Style::default().fg(ACCENT)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Centered popup rect, clamped to the frame
fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render the blocking alert popup
fn render_alert(frame: &mut Frame, app: &App) {
    let Some(alert) = &app.alert else {
        return;
    };

    let color = match alert.level {
        AlertLevel::Info => SUCCESS,
        AlertLevel::Error => DANGER,
    };
    let height = alert.message.lines().count() as u16 + 4;
    let popup_area = popup_rect(frame.area(), 56, height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", alert.title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(" press any key ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(alert.message.as_str())
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App) {
    let Some(help_text) = app.help_text else {
        return;
    };

    let height = help_text.lines().count() as u16 + 4;
    let popup_area = popup_rect(frame.area(), 70, height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help (press any key to close) ")
        .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUCCESS));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, popup_area);
}
