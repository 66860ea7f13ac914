mod text_sanitizer;

pub use text_sanitizer::sanitize_extracted_text;
