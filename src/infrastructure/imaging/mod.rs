mod page_loader;

pub use page_loader::{MAX_PAGE_BYTES, PageLoadError, load_page};
