use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::grid::{FocusOwner, NodeId, NodeKind, SectionKind, Table};

use super::hitmap::HitMap;
use super::style::{StyleSheet, Theme};
use super::viewport::column_window;
use super::{CELL_PADDING, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, overlays, status};

/// Render the complete UI and rebuild the hit map.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let [table_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    model.hit_map.clear();
    render_table(model, frame, table_area);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, status_area);
    } else {
        status::render_status_bar(model, frame, status_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

/// Display width of each column's content, clamped to the column limits.
///
/// The cell being edited counts its live input text plus room for the caret.
pub fn column_widths(table: &Table) -> Vec<u16> {
    let mut widths = vec![0_usize; table.column_count()];
    let rows = table
        .header_rows()
        .iter()
        .chain(table.body_rows())
        .chain(table.footer_rows());
    for row in rows {
        for (col, cell) in table.children(*row).iter().enumerate() {
            let Some(width) = widths.get_mut(col) else {
                continue;
            };
            let content = match cell_input(table, *cell) {
                Some((_, text)) => text.width() + 1,
                None => table.text_content(*cell).width(),
            };
            *width = (*width).max(content);
        }
    }
    widths
        .into_iter()
        .map(|w| {
            u16::try_from(w)
                .unwrap_or(u16::MAX)
                .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Everything needed to draw rows for one frame.
struct Painter<'a> {
    table: &'a Table,
    theme: &'a Theme,
    sheet: &'a StyleSheet,
    inner: Rect,
    gutter: u16,
    window: std::ops::Range<usize>,
    widths: Vec<u16>,
}

fn render_table(model: &mut Model, frame: &mut Frame, area: Rect) {
    let name = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let focused = model.table.focus_owner() != FocusOwner::Outside;
    let block = Block::default()
        .title(format!(" {name} "))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            model.theme.border
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let header_rows = model.table.header_rows().len();
    let footer_rows = model.table.footer_rows().len();
    let header_height = header_rows + usize::from(header_rows > 0);
    let footer_height = footer_rows + usize::from(footer_rows > 0);
    let body_height = usize::from(inner.height).saturating_sub(header_height + footer_height);

    let cursor = model.editor.cursor();
    model.viewport.resize(body_height);
    model.viewport.set_total_rows(model.table.row_count());
    if let Some(at) = cursor.at {
        model.viewport.ensure_visible(at.row);
    }

    let gutter = u16::try_from(model.table.row_count().to_string().len() + 1).unwrap_or(u16::MAX);
    let widths = column_widths(&model.table);
    let slots: Vec<u16> = widths.iter().map(|w| w + CELL_PADDING * 2 + 1).collect();
    let window = column_window(
        &slots,
        model.col_offset,
        cursor.at.map(|at| at.col),
        inner.width.saturating_sub(gutter),
    );
    model.col_offset = window.start;

    let painter = Painter {
        table: &model.table,
        theme: &model.theme,
        sheet: &model.style_sheet,
        inner,
        gutter,
        window,
        widths,
    };
    let hits = &mut model.hit_map;
    let table = painter.table;

    let bottom = inner.y + inner.height;
    let mut y = inner.y;
    for row in table.header_rows() {
        if y >= bottom {
            break;
        }
        painter.row(frame, hits, y, *row, SectionKind::Head, None);
        y += 1;
    }
    if header_rows > 0 && y < bottom {
        painter.separator(frame, y);
        y += 1;
    }

    for body_row in model.viewport.visible_range() {
        if y >= bottom {
            break;
        }
        let row = table.body_rows()[body_row];
        painter.row(frame, hits, y, row, SectionKind::Body, Some(body_row + 1));
        y += 1;
    }

    let footer_top = usize::from(bottom).checked_sub(footer_height);
    if footer_rows > 0
        && let Some(top) = footer_top.and_then(|top| u16::try_from(top).ok())
        && top >= y
    {
        painter.separator(frame, top);
        for (offset, row) in (1_u16..).zip(table.footer_rows()) {
            painter.row(frame, hits, top + offset, *row, SectionKind::Foot, None);
        }
    }
}

impl Painter<'_> {
    fn separator(&self, frame: &mut Frame, y: u16) {
        let line = "\u{2500}".repeat(usize::from(self.inner.width));
        let area = Rect::new(self.inner.x, y, self.inner.width, 1);
        frame.render_widget(Paragraph::new(line).style(self.theme.separator), area);
    }

    fn row(
        &self,
        frame: &mut Frame,
        hits: &mut HitMap,
        y: u16,
        row: NodeId,
        kind: SectionKind,
        number: Option<usize>,
    ) {
        let right = self.inner.x + self.inner.width;
        let label = number.map_or_else(String::new, |n| n.to_string());
        let gutter_width = self.gutter.min(self.inner.width);
        frame.render_widget(
            Paragraph::new(format!(
                "{label:>width$}",
                width = usize::from(self.gutter.saturating_sub(1))
            ))
            .style(self.theme.separator),
            Rect::new(self.inner.x, y, gutter_width, 1),
        );

        let mut x = self.inner.x + gutter_width;
        for col in self.window.clone() {
            if x >= right {
                break;
            }
            let Some(cell) = self.table.children(row).get(col).copied() else {
                break;
            };
            let width = self.widths[col];
            let cell_width = width + CELL_PADDING * 2;
            let style = self
                .sheet
                .style_for(self.table, cell, self.theme.section(kind));

            let cell_area = Rect::new(x, y, cell_width.min(right - x), 1);
            frame.render_widget(Paragraph::new("").style(style), cell_area);
            hits.record(cell_area, cell);

            let text_x = x + CELL_PADDING;
            if text_x < right {
                let available = usize::from(width.min(right - text_x));
                let content = self.content(cell, style, available);
                let text_width = u16::try_from(content.width).unwrap_or(u16::MAX);
                let text_area = Rect::new(text_x, y, text_width.max(1), 1);
                frame.render_widget(
                    Paragraph::new(content.text).style(content.style),
                    text_area,
                );
                if let Some(node) = self.table.children(cell).first() {
                    hits.record(text_area, *node);
                }
                if let Some(caret) = content.caret {
                    let caret_x = text_x + u16::try_from(caret).unwrap_or(0);
                    if caret_x < right {
                        frame.set_cursor_position(Position::new(caret_x, y));
                    }
                }
            }

            let separator_x = x + cell_width;
            if separator_x < right {
                frame.render_widget(
                    Paragraph::new("\u{2502}").style(self.theme.separator),
                    Rect::new(separator_x, y, 1, 1),
                );
            }
            x = separator_x.saturating_add(1);
        }
    }

    /// What to draw inside `cell`: its text, or the inline input scrolled so
    /// the caret stays visible.
    fn content(&self, cell: NodeId, style: Style, width: usize) -> CellContent {
        let Some((input, text)) = cell_input(self.table, cell) else {
            let (text, width) = slice_columns(&self.table.text_content(cell), 0, width);
            return CellContent {
                text,
                width,
                style,
                caret: None,
            };
        };

        let caret_col = input.caret_column();
        let skip = (caret_col + 1).saturating_sub(width);
        let (visible, used) = slice_columns(&text, skip, width);
        let focused = self
            .table
            .children(cell)
            .first()
            .is_some_and(|node| self.table.focus_owner() == FocusOwner::Input(*node));
        CellContent {
            text: visible,
            width: used,
            style: if input.is_all_selected() {
                style.patch(self.theme.input_selection)
            } else {
                style
            },
            caret: focused.then(|| caret_col - skip),
        }
    }
}

struct CellContent {
    text: String,
    width: usize,
    style: Style,
    /// Caret column relative to the text start, when the input has focus.
    caret: Option<usize>,
}

/// The input mounted in `cell`, with its current text.
fn cell_input(table: &Table, cell: NodeId) -> Option<(&crate::editor::InputBuffer, String)> {
    let node = *table.children(cell).first()?;
    match table.kind(node)? {
        NodeKind::Input(input) => Some((input, input.text())),
        _ => None,
    }
}

/// Take at most `width` display columns of `text`, skipping the first `skip`.
fn slice_columns(text: &str, skip: usize, width: usize) -> (String, usize) {
    let mut out = String::new();
    let mut col = 0;
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if col < skip {
            col += w;
            continue;
        }
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    (out, used)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_columns_truncates() {
        assert_eq!(slice_columns("abcdef", 0, 3), ("abc".to_string(), 3));
    }

    #[test]
    fn test_slice_columns_skips() {
        assert_eq!(slice_columns("abcdef", 2, 3), ("cde".to_string(), 3));
    }

    #[test]
    fn test_slice_columns_wide_chars() {
        assert_eq!(slice_columns("日本語", 0, 5), ("日本".to_string(), 4));
    }
}
