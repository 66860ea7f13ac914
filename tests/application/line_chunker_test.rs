use tategaki::application::services::{
    LINE_BREAK_REPLACEMENT, layout_text, normalize_line_breaks, paginate, plan_cells,
};
use tategaki::domain::SheetLayout;

#[test]
fn given_mixed_line_endings_when_normalizing_then_each_becomes_one_full_width_space() {
    assert_eq!(normalize_line_breaks("a\r\nb\rc\nd"), "a\u{3000}b\u{3000}c\u{3000}d");
}

#[test]
fn given_85_chars_with_newlines_when_paginating_then_40_40_5() {
    let body = "あ".repeat(40) + "\n" + &"い".repeat(39) + "\r\n" + &"う".repeat(4);
    assert_eq!(body.chars().filter(|c| *c != '\r').count(), 85);

    let lines = paginate(&body, 40);

    let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
    assert_eq!(widths, vec![40, 40, 5]);
    assert!(lines.iter().all(|l| !l.contains('\n') && !l.contains('\r')));
    assert!(lines[1].starts_with(LINE_BREAK_REPLACEMENT));
}

#[test]
fn given_empty_text_when_paginating_then_no_lines() {
    assert!(paginate("", 40).is_empty());
}

#[test]
fn given_three_lines_when_planning_then_writes_from_a9_and_clears_rest() {
    let lines = vec!["一".to_string(), "二".to_string(), "三".to_string()];

    let plan = plan_cells(&lines, &SheetLayout::default());

    let cells: Vec<&str> = plan.writes.iter().map(|w| w.cell.as_str()).collect();
    assert_eq!(cells, vec!["A9", "A10", "A11"]);
    assert_eq!(plan.cleared.first().map(String::as_str), Some("A12"));
    assert_eq!(plan.cleared.last().map(String::as_str), Some("A59"));
    assert_eq!(plan.cleared.len(), 48);
    assert_eq!(plan.overflow, 0);
}

#[test]
fn given_more_lines_than_rows_when_planning_then_overflow_reported() {
    let layout = SheetLayout {
        column: "B".to_string(),
        start_row: 1,
        clear_through_row: 3,
        chunk_width: 10,
    };
    let lines: Vec<String> = (0..5).map(|i| i.to_string()).collect();

    let plan = plan_cells(&lines, &layout);

    assert_eq!(plan.writes.len(), 5);
    assert_eq!(plan.writes[4].cell, "B5");
    assert!(plan.cleared.is_empty());
    assert_eq!(plan.overflow, 2);
}

#[test]
fn given_text_when_laying_out_then_lines_and_plan_agree() {
    let (lines, plan) = layout_text(&"字".repeat(85), &SheetLayout::default());

    assert_eq!(lines.len(), 3);
    assert_eq!(plan.writes.len(), 3);
    assert_eq!(plan.writes[2].value, "字".repeat(5));
}
