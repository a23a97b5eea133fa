use gridcell::editor::{CellEditor, EditorOptions, Mode, Resolution};
use gridcell::grid::csv::read_table;
use gridcell::grid::{Coord, FocusOwner, Table};

fn load(csv: &str) -> Table {
    read_table(csv.as_bytes(), true).unwrap()
}

fn focus(table: &mut Table, editor: &mut CellEditor) {
    table.focus_container();
    editor.pump_focus_events(table);
}

#[test]
fn test_edit_session_round_trip_through_csv() {
    let mut table = load("city,pop\nOslo,700\nBergen,290\n");
    let mut editor = CellEditor::attach(&table, EditorOptions::default()).unwrap();
    focus(&mut table, &mut editor);

    let target = editor
        .neighbor(&table, gridcell::grid::Direction::Down)
        .unwrap();
    editor.go_to_cell(&mut table, target);
    editor.begin_edit(&mut table, Some('T'));
    editor.pump_focus_events(&mut table);
    for ch in "rondheim".chars() {
        editor.input_mut(&mut table).unwrap().insert_char(ch);
    }
    editor.close_cell(&mut table, Resolution::Commit);
    editor.pump_focus_events(&mut table);

    assert_eq!(editor.mode(), Mode::Selected);
    assert_eq!(table.focus_owner(), FocusOwner::Container);

    let mut out = Vec::new();
    gridcell::grid::csv::write_table(&table, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "city,pop\nOslo,700\nTrondheim,290\n"
    );
}

#[test]
fn test_two_tables_keep_separate_state() {
    let mut left = load("a,b\n1,2\n3,4\n");
    let mut right = load("x\n9\n");
    let mut left_editor = CellEditor::attach(&left, EditorOptions::default()).unwrap();
    let mut right_editor = CellEditor::attach(&right, EditorOptions::default()).unwrap();

    focus(&mut left, &mut left_editor);
    left_editor.go_to_cell(&mut left, Coord::new(1, 1));
    left_editor.begin_edit(&mut left, None);
    left_editor.pump_focus_events(&mut left);

    assert_eq!(right_editor.mode(), Mode::Idle);
    assert!(!right_editor.hold_blur_event());
    focus(&mut right, &mut right_editor);
    assert_eq!(right_editor.cursor().active(), Some(Coord::ORIGIN));
    assert!(left_editor.is_editing());
}

#[test]
fn test_header_cells_are_not_addressable() {
    let table = load("h1,h2\nv1,v2\n");
    let header_cell = table.children(table.header_rows()[0])[1];
    assert_eq!(table.coordinate_of(header_cell), None);

    let body_text = table.children(table.cell_at(Coord::new(0, 1)))[0];
    assert_eq!(table.coordinate_of(body_text), Some(Coord::new(0, 1)));
}
