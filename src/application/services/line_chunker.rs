use crate::domain::{CellPlan, CellWrite, SheetLayout};

/// Full-width space; keeps a paragraph break from shifting the following rows.
pub const LINE_BREAK_REPLACEMENT: char = '\u{3000}';

pub fn normalize_line_breaks(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                normalized.push(LINE_BREAK_REPLACEMENT);
            }
            '\n' => normalized.push(LINE_BREAK_REPLACEMENT),
            other => normalized.push(other),
        }
    }

    normalized
}

/// Splits `text` into lines of at most `width` characters after normalizing line breaks.
pub fn paginate(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = normalize_line_breaks(text).chars().collect();

    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Lays lines into sequential rows of one column; untouched rows inside the clear range
/// are blanked.
pub fn plan_cells(lines: &[String], layout: &SheetLayout) -> CellPlan {
    let writes: Vec<CellWrite> = lines
        .iter()
        .enumerate()
        .map(|(offset, line)| CellWrite {
            cell: format!("{}{}", layout.column, layout.start_row + offset as u32),
            value: line.clone(),
        })
        .collect();

    let first_unwritten = layout.start_row + lines.len() as u32;
    let cleared = (first_unwritten..=layout.clear_through_row)
        .map(|row| format!("{}{}", layout.column, row))
        .collect();

    let last_row = layout.clear_through_row.max(layout.start_row.saturating_sub(1));
    let capacity = (last_row + 1 - layout.start_row) as usize;
    let overflow = lines.len().saturating_sub(capacity);

    if overflow > 0 {
        tracing::warn!(
            lines = lines.len(),
            capacity,
            overflow,
            "Essay runs past the template's row range"
        );
    }

    CellPlan {
        writes,
        cleared,
        overflow,
    }
}

pub fn layout_text(text: &str, layout: &SheetLayout) -> (Vec<String>, CellPlan) {
    let lines = paginate(text, layout.chunk_width);
    let plan = plan_cells(&lines, layout);
    (lines, plan)
}
