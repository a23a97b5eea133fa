//! The table document: an arena tree of table, sections, rows, cells and
//! content nodes, plus the class names and focus state the widget mutates.

use std::collections::BTreeSet;

use super::address::{Coord, HitTree, Role, SectionKind, resolve_coordinate};
use super::error::{GridError, Result};
use super::focus::{FocusEvent, FocusOwner, FocusTracker};
use crate::editor::InputBuffer;

/// Handle to a node in a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Table,
    Section(SectionKind),
    Row,
    Cell,
    Text(String),
    Input(InputBuffer),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: BTreeSet<String>,
}

impl Node {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            classes: BTreeSet::new(),
        }
    }
}

/// A tabular document the cell editor attaches to.
///
/// Shape queries (`row_count`, `column_count`) walk the tree on every call;
/// nothing is cached.
#[derive(Debug, Clone)]
pub struct Table {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: NodeId,
    focus: FocusTracker,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            nodes: vec![Some(Node::new(NodeKind::Table))],
            free: Vec::new(),
            root: NodeId(0),
            focus: FocusTracker::default(),
        }
    }
}

impl Table {
    /// Build a table from an optional header record and body records.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyBody`] when there is no body row or the
    /// first body row has no cells, and [`GridError::Ragged`] when a record's
    /// width differs from the first body row.
    pub fn from_records(header: Option<Vec<String>>, body: Vec<Vec<String>>) -> Result<Self> {
        TableBuilder::new().header(header).rows(body).build()
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.node(node).map(|n| &n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn section(&self, kind: SectionKind) -> Option<NodeId> {
        self.children(self.root)
            .iter()
            .copied()
            .find(|id| matches!(self.kind(*id), Some(NodeKind::Section(k)) if *k == kind))
    }

    /// Rows of the header section, empty when there is none.
    pub fn header_rows(&self) -> &[NodeId] {
        self.section(SectionKind::Head)
            .map(|head| self.children(head))
            .unwrap_or_default()
    }

    pub fn body_rows(&self) -> &[NodeId] {
        self.section(SectionKind::Body)
            .map(|body| self.children(body))
            .unwrap_or_default()
    }

    pub fn footer_rows(&self) -> &[NodeId] {
        self.section(SectionKind::Foot)
            .map(|foot| self.children(foot))
            .unwrap_or_default()
    }

    /// Number of cells in the first body row.
    pub fn column_count(&self) -> usize {
        self.body_rows()
            .first()
            .map_or(0, |row| self.children(*row).len())
    }

    pub fn row_count(&self) -> usize {
        self.body_rows().len()
    }

    pub fn header_row_count(&self) -> usize {
        self.header_rows().len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.within(self.row_count(), self.column_count())
    }

    /// The cell node at a body coordinate.
    ///
    /// # Panics
    ///
    /// Panics when `coord` lies outside the body. Callers check the extent
    /// first; an out-of-range lookup is a bug.
    pub fn cell_at(&self, coord: Coord) -> NodeId {
        let row = self.body_rows()[coord.row];
        self.children(row)[coord.col]
    }

    /// Resolve any node inside a body cell to that cell's coordinate.
    pub fn coordinate_of(&self, node: NodeId) -> Option<Coord> {
        if self.node(node).is_none() {
            return None;
        }
        resolve_coordinate(self, node)
    }

    /// Concatenated text of every text node under `node`. Input nodes do not
    /// contribute.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    pub fn cell_text(&self, coord: Coord) -> String {
        self.text_content(self.cell_at(coord))
    }

    /// Replace everything under `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.clear_children(node);
        self.append(node, NodeKind::Text(text.into()));
    }

    pub fn set_cell_text(&mut self, coord: Coord, text: impl Into<String>) {
        self.set_text(self.cell_at(coord), text);
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.remove(class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    /// Every live node carrying `class`, in arena order.
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, n)| {
                n.as_ref()
                    .filter(|n| n.classes.contains(class))
                    .map(|_| NodeId(idx))
            })
            .collect()
    }

    /// Empty `cell` and put an input node holding `buffer` inside it.
    pub fn mount_input(&mut self, cell: NodeId, buffer: InputBuffer) -> NodeId {
        self.clear_children(cell);
        self.append(cell, NodeKind::Input(buffer))
    }

    pub fn input(&self, node: NodeId) -> Option<&InputBuffer> {
        match self.kind(node) {
            Some(NodeKind::Input(buffer)) => Some(buffer),
            _ => None,
        }
    }

    pub fn input_mut(&mut self, node: NodeId) -> Option<&mut InputBuffer> {
        match self.node_mut(node).map(|n| &mut n.kind) {
            Some(NodeKind::Input(buffer)) => Some(buffer),
            _ => None,
        }
    }

    /// Detach and free an input node, returning its buffer. A focused input
    /// hands focus back to the container.
    pub fn discard_input(&mut self, node: NodeId) -> Option<InputBuffer> {
        self.input(node)?;
        self.focus.input_removed(node);
        match self.remove(node).map(|n| n.kind) {
            Some(NodeKind::Input(buffer)) => Some(buffer),
            _ => None,
        }
    }

    // --- Focus ---

    pub const fn focus_owner(&self) -> FocusOwner {
        self.focus.owner()
    }

    pub fn focus_container(&mut self) {
        self.focus.focus_container();
    }

    pub fn focus_input(&mut self, input: NodeId) {
        self.focus.focus_input(input);
    }

    /// Focus left the widget (terminal focus lost).
    pub fn leave_focus(&mut self) {
        self.focus.leave();
    }

    pub fn take_focus_event(&mut self) -> Option<FocusEvent> {
        self.focus.take_event()
    }

    // --- Arena plumbing ---

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let mut node = Node::new(kind);
        node.parent = Some(parent);
        let id = if let Some(id) = self.free.pop() {
            self.nodes[id.0] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            NodeId(self.nodes.len() - 1)
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    fn remove(&mut self, id: NodeId) -> Option<Node> {
        let parent = self.parent(id);
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|c| *c != id);
        }
        let node = self.nodes.get_mut(id.0)?.take()?;
        for child in &node.children {
            self.remove_subtree(*child);
        }
        self.free.push(id);
        Some(node)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
            for child in node.children {
                self.remove_subtree(child);
            }
            self.free.push(id);
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self.children(node).to_vec();
        for child in children {
            if self.input(child).is_some() {
                self.discard_input(child);
            } else {
                self.remove(child);
            }
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.node(node) else {
            return;
        };
        if let NodeKind::Text(text) = &n.kind {
            out.push_str(text);
        }
        for child in &n.children {
            self.collect_text(*child, out);
        }
    }
}

impl HitTree for Table {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn role(&self, node: NodeId) -> Role {
        match self.kind(node) {
            Some(NodeKind::Table) => Role::Table,
            Some(NodeKind::Section(kind)) => Role::Section(*kind),
            Some(NodeKind::Row) => Role::Row,
            Some(NodeKind::Cell) => Role::Cell,
            Some(NodeKind::Text(_) | NodeKind::Input(_)) | None => Role::Other,
        }
    }

    fn row_index(&self, row: NodeId) -> Option<usize> {
        self.header_rows()
            .iter()
            .chain(self.body_rows())
            .chain(self.footer_rows())
            .position(|r| *r == row)
    }

    fn cell_index(&self, cell: NodeId) -> Option<usize> {
        let row = Self::parent(self, cell)?;
        self.children(row).iter().position(|c| *c == cell)
    }

    fn header_row_count(&self) -> usize {
        Self::header_row_count(self)
    }
}

/// Assembles a [`Table`] section by section.
#[derive(Debug, Default)]
pub struct TableBuilder {
    header: Vec<Vec<String>>,
    body: Vec<Vec<String>>,
    footer: Vec<Vec<String>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, record: Option<Vec<String>>) -> Self {
        self.header.extend(record);
        self
    }

    #[must_use]
    pub fn row<S: Into<String>>(mut self, record: impl IntoIterator<Item = S>) -> Self {
        self.body.push(record.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn rows(mut self, records: Vec<Vec<String>>) -> Self {
        self.body.extend(records);
        self
    }

    #[must_use]
    pub fn footer<S: Into<String>>(mut self, record: impl IntoIterator<Item = S>) -> Self {
        self.footer.push(record.into_iter().map(Into::into).collect());
        self
    }

    /// # Errors
    ///
    /// See [`Table::from_records`].
    pub fn build(self) -> Result<Table> {
        let width = self.body.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyBody);
        }
        let records = self.header.iter().chain(&self.body).chain(&self.footer);
        for (record, fields) in records.enumerate() {
            if fields.len() != width {
                return Err(GridError::Ragged {
                    record,
                    expected: width,
                    found: fields.len(),
                });
            }
        }

        let mut table = Table::default();
        let root = table.root;
        for (kind, records) in [
            (SectionKind::Head, self.header),
            (SectionKind::Body, self.body),
            (SectionKind::Foot, self.footer),
        ] {
            if records.is_empty() {
                continue;
            }
            let section = table.append(root, NodeKind::Section(kind));
            for record in records {
                let row = table.append(section, NodeKind::Row);
                for field in record {
                    let cell = table.append(row, NodeKind::Cell);
                    table.append(cell, NodeKind::Text(field));
                }
            }
        }
        Ok(table)
    }
}
