//! In-place cell editing for a table document.
//!
//! [`CellEditor`] is the per-table state machine: it owns the cursor, the
//! pending edit and the one-shot blur suppression flag, and it mutates the
//! table's class names, content and focus. [`InputBuffer`] is the live text
//! of the inline input while a cell is being edited.

mod input;
mod machine;

pub use input::InputBuffer;
pub use machine::{CellEditor, CommittedEdit, Cursor, EditorOptions, Mode, Resolution};
