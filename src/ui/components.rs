//! Shared UI components (status bar, modal helpers).
//!
//! Contains small building blocks reused by the form and listing panes.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, Focus};

/// Render the bottom status bar with focus, counts and in-flight requests.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let focus = match app.focus {
        Focus::List => "LIST",
        Focus::Form => "FORM",
    };
    let mut busy = Vec::new();
    if app.list_loading {
        busy.push("loading");
    }
    if app.create_loading {
        busy.push("creating");
    }
    let busy_str = if busy.is_empty() {
        String::new()
    } else {
        format!("  [{}]", busy.join(","))
    };
    let msg = format!(
        "focus: {focus}  users:{}{}  ?: help",
        app.users.len(),
        busy_str
    );
    let style = Style::default()
        .fg(app.theme.status_fg)
        .bg(app.theme.status_bg);
    f.render_widget(Paragraph::new(msg).style(style), area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the oldest pending alert.
pub fn render_alert_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 50u16.min(max_w);
    let approx_lines = (message.len() as u16 / width.saturating_sub(4).max(10)).max(1);
    let height = (approx_lines + 4).min(area.height.saturating_sub(2).max(5));
    let rect = centered_rect(width, height, area);
    let more = app.alerts.len().saturating_sub(1);
    let title = if more > 0 {
        format!("Alert (+{more})")
    } else {
        "Alert".to_string()
    };
    let lines = vec![
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn confirm_prompt(name: &str) -> String {
    format!("Are you sure you want to delete {name}?")
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, name: &str, yes: bool) {
    let rect = centered_rect(56, 7, area);
    let active = Style::default()
        .fg(app.theme.highlight_fg)
        .bg(app.theme.highlight_bg)
        .add_modifier(Modifier::REVERSED);
    let inactive = Style::default().fg(app.theme.text);
    let button = |label: &'static str, on: bool| {
        Span::styled(label, if on { active } else { inactive })
    };
    let lines = vec![
        Line::raw(confirm_prompt(name)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("   "),
            button(" Yes ", yes),
            Span::raw("   "),
            button(" No ", !yes),
        ]),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Delete user")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal from the live keymap plus the fixed form keys.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let row = |label: &str, keys: String| {
        Line::from(vec![
            Span::raw(format!("  {:>18} │ ", label)),
            Span::styled(keys, italic),
        ])
    };
    let keys = |a: KeyAction| app.keymap.keys_for(a).join(", ");
    let pair = |a: KeyAction, b: KeyAction| format!("{} / {}", keys(a), keys(b));

    let lines = vec![
        Line::from(Span::styled("User list:", bold)),
        row("Move", pair(KeyAction::MoveUp, KeyAction::MoveDown)),
        row("Page", pair(KeyAction::PageUp, KeyAction::PageDown)),
        row("Delete user", keys(KeyAction::DeleteSelection)),
        row("Refresh", keys(KeyAction::Refresh)),
        row("New user", keys(KeyAction::FocusForm)),
        row("Switch pane", keys(KeyAction::ToggleFocus)),
        row("Help", keys(KeyAction::OpenHelp)),
        row("Quit", keys(KeyAction::Quit)),
        Line::raw(""),
        Line::from(Span::styled("Add New User form:", bold)),
        row("Next / prev field", "Tab, Down / BackTab, Up".to_string()),
        row("Submit", "Enter".to_string()),
        row("Back to list", "Esc".to_string()),
        Line::raw(""),
        Line::from(Span::styled("Dialogs:", bold)),
        row("Confirm / dismiss", "Enter (y / n in delete prompt)".to_string()),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
