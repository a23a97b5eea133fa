use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use crate::editor::{CellEditor, EditorOptions, Mode};
use crate::grid::{Coord, FocusOwner, Table, csv::read_table};

use super::{App, Message, Model, ToastLevel, update};

fn model_from_csv(csv: &str, options: EditorOptions) -> Model {
    let table = read_table(csv.as_bytes(), true).unwrap();
    let editor = CellEditor::attach(&table, options).unwrap();
    Model::new(PathBuf::from("test.csv"), table, editor, (80, 24))
}

fn create_test_model() -> Model {
    let model = model_from_csv(
        "name,qty\napple,3\npear,5\nplum,7\n",
        EditorOptions::default(),
    );
    update(model, Message::FocusGained)
}

/// 3 rows by 2 columns, every body cell empty.
fn empty_grid_model() -> Model {
    let model = model_from_csv("a,b\n,\n,\n,\n", EditorOptions::default());
    update(model, Message::FocusGained)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn press(model: Model, code: KeyCode) -> Model {
    match App::handle_key(key(code), &model) {
        Some(msg) => update(model, msg),
        None => model,
    }
}

fn type_text(mut model: Model, text: &str) -> Model {
    for c in text.chars() {
        model = press(model, KeyCode::Char(c));
    }
    model
}

fn draw(model: &mut Model) {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| App::view(model, frame)).unwrap();
}

/// A screen position whose hit resolves to `target`.
fn screen_point(model: &Model, target: Coord) -> (u16, u16) {
    for y in 0..24 {
        for x in 0..80 {
            let hit = model
                .hit_map
                .hit_test(x, y)
                .and_then(|node| model.table.coordinate_of(node));
            if hit == Some(target) {
                return (x, y);
            }
        }
    }
    panic!("{target} not on screen");
}

fn click(model: Model, (column, row): (u16, u16)) -> Model {
    let mouse = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    match App::handle_mouse(mouse, &model) {
        Some(msg) => update(model, msg),
        None => model,
    }
}

fn marked_cells(table: &Table) -> Vec<Coord> {
    let mut nodes = table.nodes_with_class("select");
    nodes.extend(table.nodes_with_class("edit"));
    nodes
        .into_iter()
        .filter_map(|node| table.coordinate_of(node))
        .collect()
}

#[test]
fn test_focus_gained_selects_first_cell() {
    let model = create_test_model();
    assert_eq!(model.editor.cursor().active(), Some(Coord::ORIGIN));
    assert_eq!(model.table.focus_owner(), FocusOwner::Container);
    assert_eq!(marked_cells(&model.table), vec![Coord::ORIGIN]);
}

#[test]
fn test_arrow_keys_move_selection() {
    let model = create_test_model();
    let model = press(model, KeyCode::Down);
    let model = press(model, KeyCode::Right);
    assert_eq!(model.editor.cursor().active(), Some(Coord::new(1, 1)));
    assert_eq!(marked_cells(&model.table), vec![Coord::new(1, 1)]);
}

#[test]
fn test_arrow_past_boundary_produces_no_message() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Up), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Left), &model), None);

    let model = press(model, KeyCode::Right);
    assert_eq!(App::handle_key(key(KeyCode::Right), &model), None);
}

#[test]
fn test_arrows_ignored_without_coordinate() {
    let model = model_from_csv("a\n1\n", EditorOptions::default());
    assert_eq!(model.editor.cursor().at, None);
    assert_eq!(App::handle_key(key(KeyCode::Down), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Char('x')), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Enter), &model), None);
}

#[test]
fn test_arrows_do_not_navigate_while_editing() {
    let model = create_test_model();
    let model = press(model, KeyCode::Enter);
    assert!(model.editor.is_editing());

    assert_eq!(App::handle_key(key(KeyCode::Down), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Up), &model), None);
    assert_eq!(
        App::handle_key(key(KeyCode::Left), &model),
        Some(Message::InputMoveCaret(crate::grid::Direction::Left))
    );
}

#[test]
fn test_enter_edits_and_commits() {
    let model = create_test_model();
    let model = press(model, KeyCode::Enter);
    assert_eq!(model.editor.mode(), Mode::Editing);
    assert!(matches!(
        model.table.focus_owner(),
        FocusOwner::Input(_)
    ));
    assert!(!model.editor.hold_blur_event());

    let model = type_text(model, "kiwi");
    let model = press(model, KeyCode::Enter);
    assert_eq!(model.table.cell_text(Coord::ORIGIN), "kiwi");
    assert_eq!(model.editor.mode(), Mode::Selected);
    assert_eq!(model.table.focus_owner(), FocusOwner::Container);
    assert!(model.is_dirty());
}

#[test]
fn test_escape_cancels_edit() {
    let model = create_test_model();
    let model = press(model, KeyCode::Char('z'));
    assert_eq!(model.editor.input(&model.table).unwrap().text(), "z");

    let model = press(model, KeyCode::Esc);
    assert_eq!(model.table.cell_text(Coord::ORIGIN), "apple");
    assert_eq!(model.editor.mode(), Mode::Selected);
    assert!(!model.is_dirty());
}

#[test]
fn test_escape_when_not_editing_is_ignored() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), None);
}

#[test]
fn test_typing_replaces_cell_text() {
    let model = create_test_model();
    let model = type_text(model, "fig");
    let model = press(model, KeyCode::Enter);
    assert_eq!(model.table.cell_text(Coord::ORIGIN), "fig");
}

#[test]
fn test_caret_editing_keys() {
    let model = create_test_model();
    let model = press(model, KeyCode::Enter);
    // Text starts fully selected; Home collapses to the start.
    let model = press(model, KeyCode::Home);
    let model = press(model, KeyCode::Delete);
    let model = press(model, KeyCode::End);
    let model = press(model, KeyCode::Backspace);
    let model = type_text(model, "s");
    let model = press(model, KeyCode::Enter);
    assert_eq!(model.table.cell_text(Coord::ORIGIN), "ppls");
}

#[test]
fn test_focus_lost_commits_and_clears_marker() {
    let model = create_test_model();
    let model = press(model, KeyCode::Char('q'));
    let model = update(model, Message::FocusLost);

    assert_eq!(model.table.cell_text(Coord::ORIGIN), "q");
    assert_eq!(model.editor.mode(), Mode::Idle);
    assert!(marked_cells(&model.table).is_empty());

    let model = update(model, Message::FocusGained);
    assert_eq!(marked_cells(&model.table), vec![Coord::ORIGIN]);
}

#[test]
fn test_click_selects_cell() {
    let mut model = create_test_model();
    draw(&mut model);
    let point = screen_point(&model, Coord::new(2, 1));
    let model = click(model, point);
    assert_eq!(model.editor.cursor().active(), Some(Coord::new(2, 1)));
}

#[test]
fn test_click_on_header_is_ignored() {
    let mut model = create_test_model();
    draw(&mut model);
    // Border row 0, header row 1.
    let before = model.editor.cursor();
    let model = click(model, (4, 1));
    assert_eq!(model.editor.cursor(), before);
}

#[test]
fn test_click_while_editing_commits_previous_cell() {
    let model = create_test_model();
    let mut model = type_text(model, "new");
    draw(&mut model);
    let point = screen_point(&model, Coord::new(1, 0));
    let model = click(model, point);

    assert_eq!(model.table.cell_text(Coord::ORIGIN), "new");
    assert_eq!(model.editor.cursor().active(), Some(Coord::new(1, 0)));
    assert_eq!(marked_cells(&model.table), vec![Coord::new(1, 0)]);
}

#[test]
fn test_scenario_click_move_edit_commit() {
    let mut model = empty_grid_model();
    draw(&mut model);
    let point = screen_point(&model, Coord::new(1, 1));
    let model = click(model, point);
    assert!(
        model
            .table
            .has_class(model.table.cell_at(Coord::new(1, 1)), "select")
    );

    let model = press(model, KeyCode::Down);
    assert_eq!(model.editor.cursor().active(), Some(Coord::new(2, 1)));

    let model = press(model, KeyCode::Enter);
    let cell = model.table.cell_at(Coord::new(2, 1));
    assert!(model.table.has_class(cell, "edit"));
    let input = model.editor.input(&model.table).unwrap();
    assert!(input.is_all_selected());
    assert!(matches!(model.table.focus_owner(), FocusOwner::Input(_)));

    let model = type_text(model, "42");
    let model = press(model, KeyCode::Enter);
    assert_eq!(model.table.cell_text(Coord::new(2, 1)), "42");
    assert!(!model.table.has_class(cell, "edit"));
    assert_eq!(model.table.focus_owner(), FocusOwner::Container);
    assert_eq!(marked_cells(&model.table), vec![Coord::new(2, 1)]);
}

#[test]
fn test_direct_edit_mode_opens_editor_on_navigation() {
    let options = EditorOptions {
        edit_key: false,
        ..EditorOptions::default()
    };
    let model = update(
        model_from_csv("a,b\n1,2\n3,4\n", options),
        Message::FocusGained,
    );
    assert!(model.editor.is_editing());

    // Arrows are gated while editing, so Enter commits first.
    let model = type_text(model, "9");
    let model = press(model, KeyCode::Enter);
    assert_eq!(model.editor.mode(), Mode::Selected);
    let model = press(model, KeyCode::Right);
    assert!(model.editor.is_editing());
    assert_eq!(model.editor.cursor().at, Some(Coord::new(0, 1)));
    assert_eq!(model.table.cell_text(Coord::ORIGIN), "9");
}

#[test]
fn test_help_swallows_keys() {
    let model = create_test_model();
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    assert_eq!(
        App::handle_key(key(KeyCode::Down), &model),
        Some(Message::HideHelp)
    );
    let model = press(model, KeyCode::Down);
    assert!(!model.help_visible);
    assert_eq!(model.editor.cursor().active(), Some(Coord::ORIGIN));
}

#[test]
fn test_app_keys() {
    let model = create_test_model();
    assert_eq!(App::handle_key(ctrl('s'), &model), Some(Message::Save));
    assert_eq!(App::handle_key(ctrl('q'), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
    assert_eq!(
        App::handle_key(key(KeyCode::F(1)), &model),
        Some(Message::ToggleHelp)
    );
}

#[test]
fn test_focus_events_map_to_messages() {
    let model = create_test_model();
    assert_eq!(
        App::handle_event(&Event::FocusLost, &model),
        Some(Message::FocusLost)
    );
    assert_eq!(
        App::handle_event(&Event::FocusGained, &model),
        Some(Message::FocusGained)
    );
}

#[test]
fn test_quit_without_changes() {
    let model = create_test_model();
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_with_unsaved_changes_needs_confirmation() {
    let model = create_test_model();
    let model = type_text(model, "x");
    let model = press(model, KeyCode::Enter);

    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert!(matches!(
        model.active_toast(),
        Some((_, ToastLevel::Warning))
    ));

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_message_resets_quit_confirmation() {
    let model = create_test_model();
    let model = type_text(model, "x");
    let model = press(model, KeyCode::Enter);
    let model = update(model, Message::Quit);
    let model = press(model, KeyCode::Down);
    assert!(!model.quit_confirmed);
}

#[test]
fn test_save_writes_file_and_clears_dirty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fruit.csv");
    std::fs::write(&path, "name,qty\napple,3\n").unwrap();

    let table = crate::grid::csv::load_table(&path, true).unwrap();
    let editor = CellEditor::attach(&table, EditorOptions::default()).unwrap();
    let model = update(
        Model::new(path.clone(), table, editor, (80, 24)),
        Message::FocusGained,
    );

    // Saving mid-edit commits the open edit first.
    let model = type_text(model, "mango");
    let mut model = update(model, Message::Save);
    App::handle_message_side_effects(&mut model, &Message::Save);

    assert!(!model.is_dirty());
    assert_eq!(model.editor.mode(), Mode::Selected);
    assert!(matches!(model.active_toast(), Some((_, ToastLevel::Info))));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "name,qty\nmango,3\n"
    );
}

#[test]
fn test_untouched_multiline_cell_survives_edit_and_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.csv");
    std::fs::write(&path, "h\n\"a\nb\"\n").unwrap();

    let table = crate::grid::csv::load_table(&path, true).unwrap();
    let editor = CellEditor::attach(&table, EditorOptions::default()).unwrap();
    let model = update(
        Model::new(path.clone(), table, editor, (80, 24)),
        Message::FocusGained,
    );

    let model = press(model, KeyCode::Enter);
    assert_eq!(model.editor.input(&model.table).unwrap().text(), "a b");
    let model = press(model, KeyCode::Enter);

    assert_eq!(model.table.cell_text(Coord::ORIGIN), "a\nb");
    assert!(!model.is_dirty());
    assert!(model.editor.last_commit().is_none());

    let mut model = update(model, Message::Save);
    App::handle_message_side_effects(&mut model, &Message::Save);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "h\n\"a\nb\"\n");
}

#[test]
fn test_save_failure_shows_error_toast() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let table = read_table("a\n1\n".as_bytes(), true).unwrap();
    let editor = CellEditor::attach(&table, EditorOptions::default()).unwrap();
    let mut model = Model::new(path, table, editor, (80, 24));

    App::handle_message_side_effects(&mut model, &Message::Save);
    assert!(matches!(model.active_toast(), Some((_, ToastLevel::Error))));
}

#[test]
fn test_toast_expires() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Info, "hello");
    assert!(!model.expire_toast(std::time::Instant::now()));
    let later = std::time::Instant::now() + std::time::Duration::from_secs(10);
    assert!(model.expire_toast(later));
    assert!(model.active_toast().is_none());
}
