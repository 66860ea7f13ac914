use std::time::Duration;

use config::{Config, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::RetryPolicy;
use crate::domain::{GridShape, GroupSwitchPolicy, SheetLayout};

use super::Environment;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid APP_ENVIRONMENT: {0}")]
    Environment(String),
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub extraction: ExtractionSettings,
    pub writing: WritingSettings,
    pub sheet: SheetLayout,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub primary_model: String,
    pub secondary_model: String,
    pub columns: u32,
    pub rows: u32,
    pub max_retries: u32,
    pub backoff_base: f64,
    pub jitter_max_ms: u64,
    pub max_delay_ms: u64,
    pub pool_width: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ExtractionSettings {
    pub fn grid(&self) -> Result<GridShape, SettingsError> {
        GridShape::new(self.columns, self.rows).map_err(|e| SettingsError::Invalid {
            key: "extraction.columns/rows",
            reason: e.to_string(),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff_base: self.backoff_base,
            jitter_max: Duration::from_millis(self.jitter_max_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WritingSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub target_length: usize,
    pub style_exemplar: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    pub group_switch_policy: GroupSwitchPolicy,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{env}` (optional) and `APP__`-prefixed
    /// environment variables, e.g. `APP__EXTRACTION__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.filter", crate::infrastructure::observability::DEFAULT_FILTER)?
            .set_default("logging.enable_json", false)?
            .set_default("extraction.base_url", "https://api.openai.com/v1")?
            .set_default("extraction.primary_model", "gpt-4o")?
            .set_default("extraction.secondary_model", "gpt-4o-mini")?
            .set_default("extraction.columns", 3)?
            .set_default("extraction.rows", 2)?
            .set_default("extraction.max_retries", 4)?
            .set_default("extraction.backoff_base", 2.0)?
            .set_default("extraction.jitter_max_ms", 1_000)?
            .set_default("extraction.max_delay_ms", 60_000)?
            .set_default("extraction.pool_width", 2)?
            .set_default("extraction.max_tokens", 4_096)?
            .set_default("extraction.temperature", 0.0)?
            .set_default("writing.base_url", "https://api.openai.com/v1")?
            .set_default("writing.model", "gpt-4o")?
            .set_default("writing.temperature", 0.7)?
            .set_default("writing.target_length", 400)?
            .set_default("sheet.column", "A")?
            .set_default("sheet.start_row", 9)?
            .set_default("sheet.clear_through_row", 59)?
            .set_default("sheet.chunk_width", 40)?
            .set_default("session.group_switch_policy", "clear_draft")?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        self.extraction.grid()?;
        if self.sheet.chunk_width == 0 {
            return Err(SettingsError::Invalid {
                key: "sheet.chunk_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.sheet.start_row == 0 || self.sheet.clear_through_row < self.sheet.start_row {
            return Err(SettingsError::Invalid {
                key: "sheet.start_row",
                reason: format!(
                    "rows {}..={} do not form a range",
                    self.sheet.start_row, self.sheet.clear_through_row
                ),
            });
        }
        Ok(())
    }
}
