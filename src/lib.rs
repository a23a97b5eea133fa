// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. grid::GridError)
    clippy::module_name_repetitions
)]

//! # gridcell
//!
//! A terminal CSV grid with spreadsheet-style, in-place cell editing.
//!
//! A CSV file is loaded into a table document (sections, rows, cells and
//! their content). A [`CellEditor`](editor::CellEditor) attaches to that
//! document and keeps exactly one cell active: selected, or being edited in
//! an inline input. Arrow keys and mouse clicks move between cells; Enter or
//! typing opens the editor; Enter commits and Escape rolls back.
//!
//! ## Architecture
//!
//! gridcell uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`grid`]: The table document, addressing, focus tracking, CSV
//! - [`editor`]: The cell navigation and editing state machine
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Persistent default flags

pub mod app;
pub mod config;
pub mod editor;
pub mod grid;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{CellEditor, EditorOptions, Mode};
    pub use crate::grid::{Coord, Table};
}
