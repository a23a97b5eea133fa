use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let open_hint = if model.editor.options().edit_key {
        "  Enter               Edit selected cell"
    } else {
        "  (direct edit)       Moving opens the editor"
    };

    let lines = vec![
        Line::styled("Navigation", section_style),
        Line::raw("  Arrows              Move between cells"),
        Line::raw("  Click               Go to cell"),
        Line::raw(""),
        Line::styled("Editing", section_style),
        Line::raw(open_hint),
        Line::raw("  Any character       Replace cell text"),
        Line::raw("  Enter               Commit"),
        Line::raw("  Esc                 Cancel"),
        Line::raw("  Left/Right, Home/End  Move caret"),
        Line::raw("  Backspace/Delete    Delete"),
        Line::raw(""),
        Line::styled("File", section_style),
        Line::raw("  Ctrl-s              Save"),
        Line::raw("  Ctrl-q / Ctrl-c     Quit"),
        Line::raw("  F1                  Toggle help"),
        Line::raw(""),
        Line::styled("Config", section_style),
        Line::raw(format!("  Global: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Last row is the footer hint.
    let content_height = inner.height.saturating_sub(1);
    frame.render_widget(
        Paragraph::new(lines),
        Rect::new(inner.x, inner.y, inner.width, content_height),
    );
    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled("any key closes", dim_style)),
        footer_area,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
