use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Focus};
use crate::model::Field;

/// One labelled input of the creation form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLine {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub focused: bool,
}

pub fn form_lines(app: &AppState) -> Vec<FieldLine> {
    Field::ALL
        .iter()
        .map(|&field| FieldLine {
            field,
            label: field.label(),
            value: app.form.field_text(field),
            error: app.form.errors.get(field).map(str::to_string),
            focused: app.focus == Focus::Form && app.form.focused == field,
        })
        .collect()
}

pub fn submit_label(app: &AppState) -> &'static str {
    if app.create_loading {
        "Adding..."
    } else {
        "Add User"
    }
}

pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let t = app.theme;
    let label_w = Field::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);
    let mut lines: Vec<Line> = Vec::new();
    for fl in form_lines(app) {
        let value_style = if app.create_loading {
            Style::default().fg(t.muted)
        } else if fl.focused {
            Style::default()
                .fg(t.highlight_fg)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(t.text)
        };
        let marker = if fl.focused { "> " } else { "  " };
        let placeholder = if fl.field == Field::DateOfBirth && fl.value.is_empty() {
            "YYYY-MM-DD"
        } else {
            ""
        };
        let label = format!("{:>w$}: ", fl.label, w = label_w);
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(label, Style::default().fg(t.title)),
            Span::styled(fl.value, value_style),
            Span::styled(placeholder, Style::default().fg(t.muted)),
        ];
        if let Some(err) = fl.error {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(err, Style::default().fg(t.error)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    let submit_style = Style::default().fg(t.header_fg).add_modifier(Modifier::BOLD);
    lines.push(Line::from(vec![
        Span::styled("[Enter] ", Style::default().fg(t.muted)),
        Span::styled(submit_label(app), submit_style),
    ]));

    let border = if app.focus == Focus::Form {
        t.title
    } else {
        t.border
    };
    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Add New User")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
