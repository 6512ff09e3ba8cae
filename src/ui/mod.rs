pub mod components;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, ModalState};
use crate::model::Field;

/// Form pane height: borders, one line per field, spacer, submit hint.
const FORM_HEIGHT: u16 = Field::ALL.len() as u16 + 4;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let p = Paragraph::new(format!("UserBoard  {}", app.api_url))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    form::render_form(f, root[1], app);
    users::render_users_table(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    let area = f.area();
    match app.modal.clone() {
        Some(ModalState::DeleteConfirm { name, yes, .. }) => {
            components::render_delete_confirm(f, area, app, &name, yes);
        }
        Some(ModalState::Help) => components::render_help_modal(f, area, app),
        None => {}
    }

    if let Some(message) = app.alerts.front() {
        components::render_alert_modal(f, area, app, message);
    }
}
