//! The table document the cell editor attaches to.
//!
//! - [`address`]: coordinates and generic hit-target resolution
//! - [`table`]: the arena tree (sections, rows, cells, content, classes)
//! - [`focus`]: focus owner tracking and queued focus/blur notifications
//! - [`csv`]: loading from and saving to CSV

pub mod address;
pub mod csv;
pub mod focus;
pub mod table;

mod error;

pub use address::{Coord, Direction, HitTree, Role, SectionKind, resolve_coordinate};
pub use error::{GridError, Result};
pub use focus::{FocusEvent, FocusOwner, FocusTarget};
pub use table::{NodeId, NodeKind, Table, TableBuilder};
