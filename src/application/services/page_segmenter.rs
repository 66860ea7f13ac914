use crate::domain::{GridShape, ReadingLabel, Rect, Segment, SourcePage};

/// A span along one axis: `(start, length)`.
pub type Band = (u32, u32);

/// Splits `width` into `columns` bands ordered left to right. The leftmost band takes
/// the rounding remainder, which is where the last column of a right-to-left read ends.
pub fn column_bands(width: u32, columns: u32) -> Vec<Band> {
    let columns = columns.max(1);
    let base = width / columns;
    let remainder = width % columns;

    let mut bands = Vec::with_capacity(columns as usize);
    let mut start = 0;
    for index in 0..columns {
        let length = if index == 0 { base + remainder } else { base };
        bands.push((start, length));
        start += length;
    }
    bands
}

/// Splits `height` into `rows` bands ordered top to bottom; the bottom band takes the
/// remainder.
pub fn row_bands(height: u32, rows: u32) -> Vec<Band> {
    let rows = rows.max(1);
    let base = height / rows;
    let remainder = height % rows;

    let mut bands = Vec::with_capacity(rows as usize);
    let mut start = 0;
    for index in 0..rows {
        let length = if index == rows - 1 { base + remainder } else { base };
        bands.push((start, length));
        start += length;
    }
    bands
}

/// Cuts a page into `columns x rows` segments in vertical reading order: rightmost
/// column first, each column top to bottom.
pub fn segment_page(page: &SourcePage, grid: GridShape) -> Vec<Segment> {
    let columns = column_bands(page.width(), grid.columns());
    let rows = row_bands(page.height(), grid.rows());

    let mut segments = Vec::with_capacity(grid.segment_count());

    for (column_from_right, &(x, width)) in columns.iter().rev().enumerate() {
        for (row_from_top, &(y, height)) in rows.iter().enumerate() {
            let label = ReadingLabel::new(column_from_right as u32, row_from_top as u32, grid);
            let rect = Rect {
                x,
                y,
                width,
                height,
            };
            let pixels = page.image().crop_imm(x, y, width, height);
            segments.push(Segment::new(
                label,
                page.file_id().to_string(),
                rect,
                pixels,
            ));
        }
    }

    tracing::trace!(
        file = page.file_id(),
        grid = %grid,
        segments = segments.len(),
        "Page segmented"
    );

    segments
}
