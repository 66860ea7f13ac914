use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_WIDTH: usize = 40;

/// Where the essay lines go in the fixed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub column: String,
    pub start_row: u32,
    pub clear_through_row: u32,
    pub chunk_width: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            column: "A".to_string(),
            start_row: 9,
            clear_through_row: 59,
            chunk_width: DEFAULT_CHUNK_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    pub cell: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPlan {
    pub writes: Vec<CellWrite>,
    pub cleared: Vec<String>,
    /// Lines written past `clear_through_row`.
    pub overflow: usize,
}
