//! Screen rectangles of the nodes drawn last frame.
//!
//! The renderer records a rectangle for every cell and for the content node
//! inside it. Mouse positions resolve to the deepest recorded node, which
//! [`Table::coordinate_of`](crate::grid::Table::coordinate_of) then maps back
//! to a body coordinate.

use ratatui::layout::{Position, Rect};

use crate::grid::NodeId;

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    entries: Vec<(Rect, NodeId)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record `node` at `area`. Nodes recorded later sit above earlier ones,
    /// so a child must be recorded after its parent.
    pub fn record(&mut self, area: Rect, node: NodeId) {
        if area.width > 0 && area.height > 0 {
            self.entries.push((area, node));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The deepest node drawn at column `x`, row `y`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<NodeId> {
        let point = Position::new(x, y);
        self.entries
            .iter()
            .rev()
            .find(|(area, _)| area.contains(point))
            .map(|(_, node)| *node)
    }
}
