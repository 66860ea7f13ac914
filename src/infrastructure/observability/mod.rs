mod init_tracing;
mod prompt_sanitizer;
mod request_span;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use prompt_sanitizer::sanitize_prompt;
pub use request_span::{REQUEST_ID_HEADER, UuidRequestId, request_span};
pub use tracing_config::{DEFAULT_FILTER, TracingConfig};
