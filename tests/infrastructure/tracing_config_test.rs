use tategaki::infrastructure::observability::{DEFAULT_FILTER, TracingConfig};

#[test]
fn given_new_config_when_created_then_uses_crate_filter() {
    let config = TracingConfig::new("local", false);

    assert_eq!(config.default_filter, DEFAULT_FILTER);
    assert!(config.default_filter.contains("tategaki=debug"));
}

#[test]
fn given_blank_filter_override_when_applied_then_default_kept() {
    let config = TracingConfig::new("prod", true).with_default_filter("  ");
    assert_eq!(config.default_filter, DEFAULT_FILTER);

    let config = config.with_default_filter("warn");
    assert_eq!(config.default_filter, "warn");
    assert!(config.json_format);
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
}
