use std::fmt;

use serde::{Deserialize, Serialize};

/// Column/row split applied uniformly to every page of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridShape")]
pub struct GridShape {
    columns: u32,
    rows: u32,
}

#[derive(Deserialize)]
struct RawGridShape {
    columns: u32,
    rows: u32,
}

impl TryFrom<RawGridShape> for GridShape {
    type Error = GridShapeError;

    fn try_from(raw: RawGridShape) -> Result<Self, Self::Error> {
        Self::new(raw.columns, raw.rows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridShapeError {
    #[error("grid needs at least one column, got {0}")]
    NoColumns(u32),
    #[error("grid needs at least one row, got {0}")]
    NoRows(u32),
}

impl GridShape {
    pub const SINGLE: GridShape = GridShape {
        columns: 1,
        rows: 1,
    };

    pub fn new(columns: u32, rows: u32) -> Result<Self, GridShapeError> {
        if columns == 0 {
            return Err(GridShapeError::NoColumns(columns));
        }
        if rows == 0 {
            return Err(GridShapeError::NoRows(rows));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn segment_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_single(&self) -> bool {
        self.columns == 1 && self.rows == 1
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Position of a segment in reading order.
///
/// `column_from_right` is 0 for the rightmost column, `row_from_top` is 0 for the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadingLabel {
    column_from_right: u32,
    row_from_top: u32,
    grid: GridShape,
}

impl ReadingLabel {
    /// Indices past the grid clamp to the leftmost column and bottom row.
    pub fn new(column_from_right: u32, row_from_top: u32, grid: GridShape) -> Self {
        Self {
            column_from_right: column_from_right.min(grid.columns - 1),
            row_from_top: row_from_top.min(grid.rows - 1),
            grid,
        }
    }

    pub fn column_from_right(&self) -> u32 {
        self.column_from_right
    }

    pub fn row_from_top(&self) -> u32 {
        self.row_from_top
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    fn column_name(&self) -> Option<String> {
        let from_left = self.grid.columns - 1 - self.column_from_right;
        match self.grid.columns {
            1 => None,
            2 => Some(["left", "right"][from_left as usize].to_string()),
            3 => Some(["left", "center", "right"][from_left as usize].to_string()),
            _ => Some(format!("col{}", self.column_from_right + 1)),
        }
    }

    fn row_name(&self) -> Option<String> {
        match self.grid.rows {
            1 => None,
            2 => Some(["top", "bottom"][self.row_from_top as usize].to_string()),
            3 => Some(["top", "middle", "bottom"][self.row_from_top as usize].to_string()),
            _ => Some(format!("row{}", self.row_from_top + 1)),
        }
    }
}

impl fmt::Display for ReadingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.column_name(), self.row_name()) {
            (Some(column), Some(row)) => write!(f, "{column}-{row}"),
            (Some(column), None) => f.write_str(&column),
            (None, Some(row)) => f.write_str(&row),
            (None, None) => f.write_str("full-page"),
        }
    }
}
