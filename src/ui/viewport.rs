//! Which part of the table is on screen.
//!
//! [`Viewport`] tracks the window of body rows; [`column_window`] picks the
//! run of columns that fits the available width. Both follow the active cell
//! so it always stays visible.

use std::ops::Range;

/// The visible window of body rows.
///
/// # Example
///
/// ```
/// use gridcell::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(10, 100);
/// assert_eq!(vp.visible_range(), 0..10);
///
/// vp.ensure_visible(42);
/// assert_eq!(vp.visible_range(), 33..43);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Viewport {
    height: usize,
    offset: usize,
    total_rows: usize,
}

impl Viewport {
    /// Create a viewport `height` rows tall over `total_rows` body rows.
    pub const fn new(height: usize, total_rows: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_rows,
        }
    }

    /// First visible body row.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Range of visible body rows, clamped to the table.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height).min(self.total_rows);
        self.offset.min(end)..end
    }

    /// Scroll the least amount needed for `row` to be visible.
    pub fn ensure_visible(&mut self, row: usize) {
        if self.height == 0 {
            self.offset = row.min(self.max_offset());
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.height {
            self.offset = row + 1 - self.height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Change the window height, keeping the offset valid.
    pub fn resize(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the body row count, keeping the offset valid.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height)
    }
}

/// Pick the columns to draw.
///
/// `widths` are the full widths of each column including separators,
/// `offset` is the first column drawn last frame and `active` the column that
/// must stay visible. Returns the new first column and the exclusive end.
/// At least one column is returned whenever `widths` is non-empty.
pub fn column_window(
    widths: &[u16],
    offset: usize,
    active: Option<usize>,
    available: u16,
) -> Range<usize> {
    if widths.is_empty() {
        return 0..0;
    }
    let last = widths.len() - 1;
    let mut start = offset.min(last);
    if let Some(active) = active.map(|a| a.min(last)) {
        if active < start {
            start = active;
        }
        while start < active && span_width(&widths[start..=active]) > u32::from(available) {
            start += 1;
        }
    }

    let mut end = start;
    let mut used = 0_u32;
    while end < widths.len() {
        let next = used + u32::from(widths[end]);
        if next > u32::from(available) && end > start {
            break;
        }
        used = next;
        end += 1;
    }
    start..end
}

fn span_width(widths: &[u16]) -> u32 {
    widths.iter().map(|w| u32::from(*w)).sum()
}
