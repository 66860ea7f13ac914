mod aggregator;
mod essay_service;
mod extraction_client;
mod line_chunker;
mod page_segmenter;
mod request_builder;
mod retry;
mod task_pool;

pub use aggregator::MultiSourceAggregator;
pub use essay_service::{DEFAULT_TARGET_LENGTH, EssayError, EssayService, EssaySettings};
pub use extraction_client::ExtractionClient;
pub use line_chunker::{
    LINE_BREAK_REPLACEMENT, layout_text, normalize_line_breaks, paginate, plan_cells,
};
pub use page_segmenter::{Band, column_bands, row_bands, segment_page};
pub use request_builder::{build_request, instruction_block};
pub use retry::{RetryError, RetryPolicy, call_with_retry};
pub use task_pool::{BoundedTaskPool, TaskPanic};
