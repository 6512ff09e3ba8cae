use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::worker::{Request, Worker};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, Focus, ModalState};
use crate::ui;

/// What the event loop should do after a key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue(Option<Request>),
    Quit,
}

impl Control {
    fn none() -> Self {
        Control::Continue(None)
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    worker: &Worker,
) -> Result<()> {
    info!(api_url = %app.api_url, "starting");
    worker.dispatch(app.refresh_users());

    loop {
        while let Some(outcome) = worker.try_recv() {
            app.apply(outcome);
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(app, key) {
                    Control::Quit => break,
                    Control::Continue(Some(request)) => worker.dispatch(request),
                    Control::Continue(None) => {}
                }
            }
        }
    }

    info!("exiting");
    Ok(())
}

/// Route one key press. Alerts win over modals, modals over panes.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Control {
    let key = normalize(key);
    if !app.alerts.is_empty() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.alerts.pop_front();
        }
        return Control::none();
    }
    if app.modal.is_some() {
        return handle_modal_key(app, key);
    }
    match app.focus {
        Focus::List => handle_list_key(app, key),
        Focus::Form => handle_form_key(app, key),
    }
}

/// Terminals disagree on whether shifted characters carry SHIFT; drop it.
fn normalize(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(_) = key.code {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Control {
    let Some(action) = app.keymap.resolve(&key) else {
        return Control::none();
    };
    debug!(?action, "list action");
    match action {
        KeyAction::Quit => return Control::Quit,
        KeyAction::OpenHelp => app.modal = Some(ModalState::Help),
        KeyAction::Refresh => {
            if !app.list_loading {
                return Control::Continue(Some(app.refresh_users()));
            }
        }
        KeyAction::FocusForm => {
            app.focus = Focus::Form;
            app.form.focused = Default::default();
        }
        KeyAction::ToggleFocus => app.focus = Focus::Form,
        KeyAction::DeleteSelection => app.open_delete_confirm(),
        KeyAction::MoveUp => app.move_up(),
        KeyAction::MoveDown => app.move_down(),
        KeyAction::PageUp => app.page_up(),
        KeyAction::PageDown => app.page_down(),
        KeyAction::Ignore => {}
    }
    Control::none()
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) -> Control {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            return Control::Quit;
        }
        return Control::none();
    }
    match key.code {
        KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Enter => return Control::Continue(app.submit_new_user()),
        // Inputs are disabled while a create is in flight.
        KeyCode::Backspace if !app.create_loading => app.form.pop_char(),
        KeyCode::Char(c) if !app.create_loading => app.form.push_char(c),
        _ => {}
    }
    Control::none()
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) -> Control {
    match &mut app.modal {
        Some(ModalState::DeleteConfirm { yes, .. }) => match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                *yes = !*yes;
            }
            KeyCode::Enter => {
                let answer = *yes;
                return Control::Continue(app.answer_delete_confirm(answer));
            }
            KeyCode::Char('y') => return Control::Continue(app.answer_delete_confirm(true)),
            KeyCode::Char('n') | KeyCode::Esc => {
                app.answer_delete_confirm(false);
            }
            _ => {}
        },
        Some(ModalState::Help) => {
            let close = matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            );
            if close {
                app.modal = None;
            }
        }
        None => {}
    }
    Control::none()
}
