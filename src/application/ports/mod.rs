mod retryable;
mod text_generator;
mod vision_extractor;

pub use retryable::Retryable;
pub use text_generator::{GenerationError, TextGenerator};
pub use vision_extractor::{ExtractionServiceError, VisionExtractor};
