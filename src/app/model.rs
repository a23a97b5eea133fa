use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::CellEditor;
use crate::grid::Table;
use crate::ui::hitmap::HitMap;
use crate::ui::style::{StyleSheet, Theme};
use crate::ui::viewport::Viewport;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    /// The table document being edited
    pub table: Table,
    /// Cell navigation and editing state attached to `table`
    pub editor: CellEditor,
    /// Visible window of body rows
    pub viewport: Viewport,
    /// First column drawn last frame
    pub col_offset: usize,
    /// Node rectangles from the last frame, for mouse hit testing
    pub hit_map: HitMap,
    /// Class-name rules for cells
    pub style_sheet: StyleSheet,
    pub theme: Theme,
    /// Path the table was loaded from and is saved to
    pub file_path: PathBuf,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Editor revision at the last successful save
    saved_revision: u64,
}

impl Model {
    /// Create a model around a loaded table and its attached editor.
    pub fn new(
        file_path: PathBuf,
        table: Table,
        editor: CellEditor,
        terminal_size: (u16, u16),
    ) -> Self {
        let style_sheet = StyleSheet::for_editor(editor.options());
        // Border rows plus the status bar.
        let body_height = usize::from(terminal_size.1.saturating_sub(3));
        let viewport = Viewport::new(body_height, table.row_count());
        Self {
            table,
            editor,
            viewport,
            style_sheet,
            file_path,
            ..Self::default()
        }
    }

    /// Whether a commit changed the table since the last save.
    pub const fn is_dirty(&self) -> bool {
        self.editor.revision() != self.saved_revision
    }

    pub(super) const fn mark_saved(&mut self) {
        self.saved_revision = self.editor.revision();
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
