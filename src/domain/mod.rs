mod essay_draft;
mod extraction_request;
mod extraction_result;
mod grid;
mod pipeline_context;
mod segment;
mod sheet_layout;
mod source_group;
mod source_page;

pub use essay_draft::EssayDraft;
pub use extraction_request::{
    ExpectedSegment, ExtractionRequest, ILLEGIBLE_PLACEHOLDER, RequestItem, file_close_tag,
    file_open_tag, segment_tag, unavailable_placeholder,
};
pub use extraction_result::{
    ExtractionResult, ExtractionStatus, FAILURE_SENTINEL, FailureKind, SegmentText,
    is_failure_text,
};
pub use grid::{GridShape, GridShapeError, ReadingLabel};
pub use pipeline_context::{ContextError, GroupSwitchPolicy, PipelineContext};
pub use segment::{Rect, Segment};
pub use sheet_layout::{CellPlan, CellWrite, DEFAULT_CHUNK_WIDTH, SheetLayout};
pub use source_group::{GroupName, ModelTier, SourceGroup};
pub use source_page::SourcePage;
