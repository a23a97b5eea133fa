use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::editor::Mode;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let dirty = if model.is_dirty() { " [+]" } else { "" };

    let cursor = model.editor.cursor();
    let reference = cursor
        .at
        .map_or_else(|| "--".to_string(), |at| at.to_reference());
    let mode = match cursor.mode {
        Mode::Idle => "",
        Mode::Selected => "  SELECT",
        Mode::Editing => "  EDIT",
    };
    let size = format!("{}x{}", model.table.row_count(), model.table.column_count());
    let last = model
        .editor
        .last_commit()
        .map_or_else(String::new, |edit| format!("  edited {}", edit.at.to_reference()));

    let status = format!(" {filename}{dirty}  {reference}{mode}  [{size}]{last}  F1:help");
    let status_bar = Paragraph::new(status).style(
        Style::default()
            .bg(model.theme.status_bg)
            .fg(model.theme.status_fg),
    );
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
