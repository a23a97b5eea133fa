//! Terminal UI components.
//!
//! - [`viewport`]: which rows and columns of the table are on screen
//! - [`style`]: theme and the class-name style sheet
//! - [`hitmap`]: screen rectangles of drawn nodes, for mouse hit testing

pub mod hitmap;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::{column_widths, render};

/// Blank columns on each side of a cell's text.
pub const CELL_PADDING: u16 = 1;
pub const MIN_COLUMN_WIDTH: u16 = 3;
pub const MAX_COLUMN_WIDTH: u16 = 24;
