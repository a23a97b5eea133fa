use crate::grid::{
    Coord, Direction, FocusEvent, FocusOwner, FocusTarget, GridError, NodeId, Result, Table,
};

use super::InputBuffer;

/// Options recognised when attaching a [`CellEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// `true`: navigation lands on a cell in select mode and a key opens the
    /// editor. `false`: navigation opens the editor directly.
    pub edit_key: bool,
    /// Class put on the selected cell.
    pub select_class: String,
    /// Class put on the cell being edited.
    pub edit_class: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            edit_key: true,
            select_class: "select".to_string(),
            edit_class: "edit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Selected,
    Editing,
}

/// Which cell is current and what state it is in.
///
/// `at` survives a trip through `Idle` so focus can come back to the same
/// cell. `None` means no cell has been activated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub at: Option<Coord>,
    pub mode: Mode,
}

impl Cursor {
    /// The coordinate of the cell carrying a marker, if any.
    pub const fn active(&self) -> Option<Coord> {
        match self.mode {
            Mode::Idle => None,
            Mode::Selected | Mode::Editing => self.at,
        }
    }
}

/// How an open edit is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the live input value.
    Commit,
    /// Restore the text the cell had before editing.
    Rollback,
}

#[derive(Debug, Clone)]
struct PendingEdit {
    at: Coord,
    original: String,
    /// Text the input opened with, unless it was seeded.
    prefill: Option<String>,
    input: NodeId,
}

/// The most recent committed value of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEdit {
    pub at: Coord,
    pub previous: String,
    pub value: String,
}

/// Cell navigation and editing state for one table.
///
/// The `Default` value is detached: it never activates a cell of an empty
/// table. Use [`CellEditor::attach`] for a real table.
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    options: EditorOptions,
    cursor: Cursor,
    pending: Option<PendingEdit>,
    hold_blur_event: bool,
    last_commit: Option<CommittedEdit>,
    revision: u64,
}

impl CellEditor {
    /// Attach to `table`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyBody`] unless the body has at least one row
    /// and one column.
    pub fn attach(table: &Table, options: EditorOptions) -> Result<Self> {
        if table.row_count() == 0 || table.column_count() == 0 {
            return Err(GridError::EmptyBody);
        }
        tracing::debug!(
            rows = table.row_count(),
            cols = table.column_count(),
            edit_key = options.edit_key,
            "cell editor attached"
        );
        Ok(Self {
            options,
            cursor: Cursor::default(),
            pending: None,
            hold_blur_event: false,
            last_commit: None,
            revision: 0,
        })
    }

    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn mode(&self) -> Mode {
        self.cursor.mode
    }

    pub const fn is_editing(&self) -> bool {
        matches!(self.cursor.mode, Mode::Editing)
    }

    pub const fn hold_blur_event(&self) -> bool {
        self.hold_blur_event
    }

    pub const fn last_commit(&self) -> Option<&CommittedEdit> {
        self.last_commit.as_ref()
    }

    /// Bumped every time a commit changes a cell's text.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The inline input node while editing.
    pub fn input_node(&self) -> Option<NodeId> {
        self.pending.as_ref().map(|p| p.input)
    }

    pub fn input<'t>(&self, table: &'t Table) -> Option<&'t InputBuffer> {
        table.input(self.input_node()?)
    }

    pub fn input_mut<'t>(&self, table: &'t mut Table) -> Option<&'t mut InputBuffer> {
        table.input_mut(self.input_node()?)
    }

    /// The cell next to the current one, if it is inside the table.
    pub fn neighbor(&self, table: &Table, direction: Direction) -> Option<Coord> {
        self.cursor
            .at?
            .neighbor(direction, table.row_count(), table.column_count())
    }

    /// Move the active cell to `target`: deactivate the current cell, then
    /// select or edit the target depending on [`EditorOptions::edit_key`].
    ///
    /// A target outside the table is ignored.
    pub fn go_to_cell(&mut self, table: &mut Table, target: Coord) {
        if !table.contains(target) {
            tracing::debug!(%target, "go_to_cell outside table ignored");
            return;
        }
        self.deactivate(table);
        if self.options.edit_key {
            self.select(table, target);
        } else {
            self.enter_edit(table, target, None);
        }
    }

    pub fn select(&mut self, table: &mut Table, at: Coord) {
        let cell = table.cell_at(at);
        table.add_class(cell, &self.options.select_class);
        self.cursor = Cursor {
            at: Some(at),
            mode: Mode::Selected,
        };
        tracing::debug!(%at, "cell selected");
    }

    /// Clear the selection marker. The coordinate is kept.
    pub fn deselect(&mut self, table: &mut Table) {
        if self.cursor.mode != Mode::Selected {
            return;
        }
        if let Some(at) = self.cursor.at.filter(|at| table.contains(*at)) {
            let cell = table.cell_at(at);
            table.remove_class(cell, &self.options.select_class);
        }
        self.cursor.mode = Mode::Idle;
    }

    /// Start editing the current cell: Enter, or a printable key with `seed`.
    ///
    /// From `Idle` the cell is re-activated first; while already editing
    /// this does nothing.
    pub fn begin_edit(&mut self, table: &mut Table, seed: Option<char>) {
        let Some(at) = self.cursor.at else {
            return;
        };
        match self.cursor.mode {
            Mode::Editing => {}
            Mode::Selected => self.enter_edit(table, at, seed),
            Mode::Idle => {
                self.go_to_cell(table, at);
                match (self.cursor.mode, seed) {
                    (Mode::Selected, _) => self.enter_edit(table, at, seed),
                    (Mode::Editing, Some(ch)) => {
                        if let Some(input) = self.input_mut(table) {
                            input.insert_char(ch);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Replace the cell's content with an inline input and focus it.
    ///
    /// The input holds `seed` alone when given, otherwise the cell's trimmed
    /// text fully selected.
    pub fn enter_edit(&mut self, table: &mut Table, at: Coord, seed: Option<char>) {
        if self.is_editing() || !table.contains(at) {
            return;
        }
        let cell = table.cell_at(at);
        table.remove_class(cell, &self.options.select_class);
        table.add_class(cell, &self.options.edit_class);

        let original = table.text_content(cell);
        let (buffer, prefill) = match seed {
            Some(ch) => (InputBuffer::seeded(ch), None),
            None => {
                let buffer = InputBuffer::selected(original.trim());
                let prefill = buffer.text();
                (buffer, Some(prefill))
            }
        };
        let input = table.mount_input(cell, buffer);
        self.pending = Some(PendingEdit {
            at,
            original,
            prefill,
            input,
        });
        self.cursor = Cursor {
            at: Some(at),
            mode: Mode::Editing,
        };

        // Moving focus into the input blurs the container; that blur is ours.
        if table.focus_owner() == FocusOwner::Container {
            self.hold_blur_event = true;
        }
        table.focus_input(input);
        tracing::debug!(%at, seeded = seed.is_some(), "cell editing");
    }

    /// Close the open edit, writing back the live value or the original.
    ///
    /// An input left exactly as it was prefilled keeps the original text,
    /// untrimmed and with its line breaks. The cell stays current in
    /// `Selected` mode. Returns `true` when the cell's text changed. Does
    /// nothing unless editing.
    pub fn close_cell(&mut self, table: &mut Table, resolution: Resolution) -> bool {
        let Some(PendingEdit {
            at,
            original,
            prefill,
            input,
        }) = self.pending.take()
        else {
            return false;
        };
        let live = table.discard_input(input).map(|buffer| buffer.text());
        let value = match (resolution, live) {
            (Resolution::Commit, Some(live)) if prefill.as_deref() != Some(live.as_str()) => {
                live
            }
            _ => original.clone(),
        };
        let changed = value != original;

        if table.contains(at) {
            let cell = table.cell_at(at);
            table.remove_class(cell, &self.options.edit_class);
            table.set_text(cell, value.clone());
            table.add_class(cell, &self.options.select_class);
            self.cursor.mode = Mode::Selected;
        } else {
            self.cursor.mode = Mode::Idle;
        }

        if changed {
            self.revision += 1;
            self.last_commit = Some(CommittedEdit {
                at,
                previous: original,
                value,
            });
        }
        tracing::debug!(%at, ?resolution, changed, "cell closed");
        changed
    }

    /// The container (or the input inside it) gained focus.
    pub fn on_focus(&mut self, table: &mut Table, target: FocusTarget) {
        if target != FocusTarget::Container {
            return;
        }
        let at = *self.cursor.at.get_or_insert(Coord::ORIGIN);
        if self.cursor.mode == Mode::Idle {
            self.go_to_cell(table, at);
        }
    }

    /// The container lost focus. The first blur after an edit starts is the
    /// input taking focus and is swallowed.
    pub fn on_blur(&mut self, table: &mut Table) {
        if self.hold_blur_event {
            self.hold_blur_event = false;
            tracing::debug!("blur held");
            return;
        }
        self.deactivate(table);
    }

    /// Deliver every queued focus notification, including ones raised while
    /// handling earlier notifications.
    pub fn pump_focus_events(&mut self, table: &mut Table) {
        while let Some(event) = table.take_focus_event() {
            match event {
                FocusEvent::Focus(target) => self.on_focus(table, target),
                FocusEvent::Blur => self.on_blur(table),
            }
        }
    }

    fn deactivate(&mut self, table: &mut Table) {
        if self.is_editing() {
            self.close_cell(table, Resolution::Commit);
        }
        self.deselect(table);
    }
}
