use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::grid::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Self::handle_key(*key, model)
            }
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            Event::FocusGained => Some(Message::FocusGained),
            Event::FocusLost => Some(Message::FocusLost),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => return Some(Message::Save),
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            _ => {}
        }
        let printable = !ctrl && !key.modifiers.contains(KeyModifiers::ALT);

        if model.editor.is_editing() {
            return match key.code {
                KeyCode::Enter => Some(Message::CommitEdit),
                KeyCode::Esc => Some(Message::CancelEdit),
                KeyCode::Backspace => Some(Message::InputDeleteBack),
                KeyCode::Delete => Some(Message::InputDeleteForward),
                KeyCode::Left => Some(Message::InputMoveCaret(Direction::Left)),
                KeyCode::Right => Some(Message::InputMoveCaret(Direction::Right)),
                KeyCode::Home => Some(Message::InputHome),
                KeyCode::End => Some(Message::InputEnd),
                KeyCode::Char(c) if printable => Some(Message::InputInsert(c)),
                // Up/Down and everything else do nothing while editing.
                _ => None,
            };
        }

        let has_cell = model.editor.cursor().at.is_some();
        match key.code {
            KeyCode::Up => Self::step(model, Direction::Up),
            KeyCode::Down => Self::step(model, Direction::Down),
            KeyCode::Left => Self::step(model, Direction::Left),
            KeyCode::Right => Self::step(model, Direction::Right),
            KeyCode::Enter if has_cell => Some(Message::BeginEdit),
            KeyCode::Char(c) if printable && has_cell => Some(Message::BeginEditWith(c)),
            _ => None,
        }
    }

    /// Move one cell, unless that would leave the table.
    fn step(model: &Model, direction: Direction) -> Option<Message> {
        model
            .editor
            .neighbor(&model.table, direction)
            .map(Message::GoToCell)
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let node = model.hit_map.hit_test(mouse.column, mouse.row)?;
                model.table.coordinate_of(node).map(Message::GoToCell)
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
