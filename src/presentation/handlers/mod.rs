mod context;
mod error_response;
mod essay;
mod extract;
mod health;
mod layout;

pub use context::{CorrectGroupRequest, SelectGroupRequest, correct_group_handler, select_group_handler};
pub use error_response::{ErrorResponse, error_response};
pub use essay::{EssayRequest, essay_handler};
pub use extract::{MAX_UPLOAD_BYTES, extract_handler};
pub use health::health_handler;
pub use layout::{LayoutRequest, LayoutResponse, layout_handler};
