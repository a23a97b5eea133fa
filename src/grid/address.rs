//! Logical cell coordinates and hit-target resolution.
//!
//! [`resolve_coordinate`] works over any tree that implements [`HitTree`],
//! so the same walk serves the table document and anything else shaped like
//! table → section → row → cell → content.

use std::fmt;

/// A logical `(row, col)` position inside the body section.
///
/// Row 0 is the first body row regardless of how many header rows exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent coordinate in `direction`, or `None` when it would leave
    /// a `rows × cols` extent. There is no wraparound.
    pub fn neighbor(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        let next = match direction {
            Direction::Left => Self::new(self.row, self.col.checked_sub(1)?),
            Direction::Right => Self::new(self.row, self.col + 1),
            Direction::Up => Self::new(self.row.checked_sub(1)?, self.col),
            Direction::Down => Self::new(self.row + 1, self.col),
        };
        next.within(rows, cols).then_some(next)
    }

    pub const fn within(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Spreadsheet-style reference (`A1`, `B3`, `AA10`).
    pub fn to_reference(self) -> String {
        format!("{}{}", column_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_reference())
    }
}

fn column_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Direction for cursor and caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Head,
    Body,
    Foot,
}

/// What a node is, as far as coordinate resolution cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Table,
    Section(SectionKind),
    Row,
    Cell,
    Other,
}

/// A tree that can be walked upward from an interaction target.
pub trait HitTree {
    type Node: Copy;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn role(&self, node: Self::Node) -> Role;

    /// Index of `row` across every section in document order, header rows
    /// first. `None` when the row is not listed in any section.
    fn row_index(&self, row: Self::Node) -> Option<usize>;

    /// Index of `cell` within its row. `None` when the row does not list it.
    fn cell_index(&self, cell: Self::Node) -> Option<usize>;

    fn header_row_count(&self) -> usize;
}

/// Resolve an arbitrary descendant of a cell to the cell's body coordinate.
///
/// Returns `None` when no cell lies on the ancestor chain, when the chain is
/// too short to be cell → row → section → table, or when the owning section
/// is a header or footer.
pub fn resolve_coordinate<T: HitTree>(tree: &T, target: T::Node) -> Option<Coord> {
    let mut cell = target;
    while tree.role(cell) != Role::Cell {
        cell = tree.parent(cell)?;
    }
    let row = tree.parent(cell)?;
    if tree.role(row) != Role::Row {
        return None;
    }
    let section = tree.parent(row)?;
    if tree.role(section) != Role::Section(SectionKind::Body) {
        return None;
    }
    let table = tree.parent(section)?;
    if tree.role(table) != Role::Table {
        return None;
    }
    let row = tree.row_index(row)?.checked_sub(tree.header_row_count())?;
    Some(Coord::new(row, tree.cell_index(cell)?))
}
