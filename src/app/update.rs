use crate::app::{Model, ToastLevel};
use crate::editor::Resolution;
use crate::grid::{Coord, Direction};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Make a cell active (arrow key or click)
    GoToCell(Coord),

    // Editing
    /// Open the editor on the current cell with its text
    BeginEdit,
    /// Open the editor on the current cell with a single typed character
    BeginEditWith(char),
    /// Keep the input value and close the editor
    CommitEdit,
    /// Restore the original value and close the editor
    CancelEdit,
    /// Insert a character at the caret
    InputInsert(char),
    /// Delete character before caret (Backspace)
    InputDeleteBack,
    /// Delete character at caret (Delete)
    InputDeleteForward,
    /// Move the caret left or right
    InputMoveCaret(Direction),
    /// Move the caret to the start (Home)
    InputHome,
    /// Move the caret to the end (End)
    InputEnd,

    // Focus
    /// Terminal gained focus; the table container takes it
    FocusGained,
    /// Terminal lost focus
    FocusLost,

    // File
    /// Write the table back to its file
    Save,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Focus
/// notifications raised by the transition are delivered to the editor before
/// returning, so the model is settled when it comes back.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    let Model { table, editor, .. } = &mut model;
    match msg {
        Message::GoToCell(target) => editor.go_to_cell(table, target),
        Message::BeginEdit => editor.begin_edit(table, None),
        Message::BeginEditWith(ch) => editor.begin_edit(table, Some(ch)),
        Message::CommitEdit => {
            editor.close_cell(table, Resolution::Commit);
            table.focus_container();
        }
        Message::CancelEdit => {
            editor.close_cell(table, Resolution::Rollback);
            table.focus_container();
        }
        Message::InputInsert(ch) => {
            if let Some(input) = editor.input_mut(table) {
                input.insert_char(ch);
            }
        }
        Message::InputDeleteBack => {
            if let Some(input) = editor.input_mut(table) {
                input.delete_back();
            }
        }
        Message::InputDeleteForward => {
            if let Some(input) = editor.input_mut(table) {
                input.delete_forward();
            }
        }
        Message::InputMoveCaret(direction) => {
            if let Some(input) = editor.input_mut(table) {
                input.move_caret(direction);
            }
        }
        Message::InputHome => {
            if let Some(input) = editor.input_mut(table) {
                input.move_home();
            }
        }
        Message::InputEnd => {
            if let Some(input) = editor.input_mut(table) {
                input.move_end();
            }
        }
        Message::FocusGained => table.focus_container(),
        Message::FocusLost => table.leave_focus(),
        Message::Save => {
            // The open edit goes into the file.
            if editor.is_editing() {
                editor.close_cell(table, Resolution::Commit);
                table.focus_container();
            }
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(_, height) => {
            model.viewport.resize(usize::from(height.saturating_sub(3)));
        }
        Message::Quit => {
            if model.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }

    model.editor.pump_focus_events(&mut model.table);
    model
}
