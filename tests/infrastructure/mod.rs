mod page_loader_test;
mod text_sanitizer_test;
mod tracing_config_test;
