use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::{AppState, Focus};
use crate::model::{User, format_date};

pub const LOADING_TEXT: &str = "Loading users...";
pub const EMPTY_TEXT: &str = "No users found. Add some users using the form above.";
pub const COLUMNS: [&str; 5] = [
    "First Name",
    "Last Name",
    "Age",
    "Date of Birth",
    "Actions",
];

/// What the listing pane shows, independent of the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingView {
    Loading,
    Empty { title: String },
    Rows { title: String, rows: Vec<UserRow> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub age: String,
    pub date_of_birth: String,
}

impl UserRow {
    fn from_user(u: &User, date_format: &str) -> Self {
        Self {
            id: u.id,
            firstname: u.firstname.clone(),
            lastname: u.lastname.clone(),
            age: u.age.to_string(),
            date_of_birth: format_date(&u.date_of_birth, date_format),
        }
    }
}

pub fn listing_title(count: usize) -> String {
    format!("Users ({})", count)
}

pub fn listing_view(app: &AppState) -> ListingView {
    if app.list_loading {
        return ListingView::Loading;
    }
    let title = listing_title(app.users.len());
    if app.users.is_empty() {
        return ListingView::Empty { title };
    }
    let rows = app
        .users
        .iter()
        .map(|u| UserRow::from_user(u, &app.date_format))
        .collect();
    ListingView::Rows { title, rows }
}

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let border = if app.focus == Focus::List {
        app.theme.title
    } else {
        app.theme.border
    };
    let block = |title: String| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
    };
    let muted = Style::default().fg(app.theme.muted);

    match listing_view(app) {
        ListingView::Loading => {
            let p = Paragraph::new(LOADING_TEXT)
                .style(muted)
                .block(block("Users".to_string()));
            f.render_widget(p, area);
        }
        ListingView::Empty { title } => {
            let p = Paragraph::new(EMPTY_TEXT).style(muted).block(block(title));
            f.render_widget(p, area);
        }
        ListingView::Rows { title, rows } => {
            let rows = rows.into_iter().map(|r| {
                Row::new(vec![
                    Cell::from(r.firstname),
                    Cell::from(r.lastname),
                    Cell::from(r.age),
                    Cell::from(r.date_of_birth),
                    Cell::from("[d] Delete"),
                ])
                .style(Style::default().fg(app.theme.text))
            });

            let widths = [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Length(5),
                Constraint::Length(14),
                Constraint::Length(12),
            ];

            let header = Row::new(COLUMNS.to_vec()).style(
                Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
            );

            let highlight = Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD);
            let table = Table::new(rows, widths)
                .header(header)
                .block(block(title))
                .row_highlight_style(highlight)
                .column_spacing(1);

            let selected = Some(app.selected_user_index);
            let mut state = TableState::default().with_selected(selected);
            f.render_stateful_widget(table, area, &mut state);
        }
    }
}
