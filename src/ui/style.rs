//! Theming and the class-name style sheet.
//!
//! The cell editor only puts class names on cells. [`StyleSheet`] is the
//! host side of that contract: it maps class names to terminal styles, the
//! way a page's CSS gives meaning to `select` and `edit`.

use ratatui::style::{Color, Modifier, Style};

use crate::editor::EditorOptions;
use crate::grid::{NodeId, SectionKind, Table};

/// Colors for everything that isn't driven by a class name.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub body: Style,
    pub footer: Style,
    pub border: Style,
    pub separator: Style,
    /// Input text while it is fully selected.
    pub input_selection: Style,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            body: Style::default(),
            footer: Style::default()
                .fg(Color::Indexed(245))
                .add_modifier(Modifier::ITALIC),
            border: Style::default().fg(Color::Indexed(240)),
            separator: Style::default().fg(Color::Indexed(240)),
            input_selection: Style::default().bg(Color::Blue).fg(Color::White),
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(252),
        }
    }
}

impl Theme {
    pub const fn section(&self, kind: SectionKind) -> Style {
        match kind {
            SectionKind::Head => self.header,
            SectionKind::Body => self.body,
            SectionKind::Foot => self.footer,
        }
    }
}

/// Ordered class-name rules. Later rules patch earlier ones.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<(String, Style)>,
}

impl StyleSheet {
    /// Rules for the editor's select and edit classes.
    pub fn for_editor(options: &EditorOptions) -> Self {
        Self::default()
            .rule(
                options.select_class.clone(),
                Style::default().add_modifier(Modifier::REVERSED),
            )
            .rule(
                options.edit_class.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
    }

    #[must_use]
    pub fn rule(mut self, class: impl Into<String>, style: Style) -> Self {
        self.rules.push((class.into(), style));
        self
    }

    /// `base` patched with every rule whose class `node` carries.
    pub fn style_for(&self, table: &Table, node: NodeId, base: Style) -> Style {
        self.rules
            .iter()
            .filter(|(class, _)| table.has_class(node, class))
            .fold(base, |style, (_, rule)| style.patch(*rule))
    }
}
