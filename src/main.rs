use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use tategaki::application::services::{EssayService, EssaySettings, MultiSourceAggregator};
use tategaki::domain::ModelTier;
use tategaki::infrastructure::llm::BackendFactory;
use tategaki::infrastructure::observability::{TracingConfig, init_tracing};
use tategaki::presentation::config::SettingsError;
use tategaki::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(SettingsError::Environment)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let mut tracing_config =
        TracingConfig::default().with_default_filter(settings.logging.filter.clone());
    tracing_config.environment = environment.to_string();
    tracing_config.json_format |= settings.logging.enable_json;
    init_tracing(&tracing_config);

    let scaffold_config = ScaffoldConfig::from_env();

    let extractor = BackendFactory::vision_extractor(&settings.extraction, &scaffold_config)?;
    let generator = BackendFactory::text_generator(&settings.writing, &scaffold_config)?;

    let grid = settings.extraction.grid()?;
    let aggregator = MultiSourceAggregator::new(
        grid,
        settings.extraction.retry_policy(),
        settings.extraction.pool_width,
    )
    .with_route(
        ModelTier::Primary,
        Arc::clone(&extractor),
        settings.extraction.primary_model.clone(),
    )
    .with_route(
        ModelTier::Secondary,
        extractor,
        settings.extraction.secondary_model.clone(),
    );

    let essay_service = EssayService::new(
        generator,
        EssaySettings {
            target_length: settings.writing.target_length,
            style_exemplar: settings.writing.style_exemplar.clone(),
        },
    );

    let state = AppState {
        aggregator: Arc::new(aggregator),
        essay_service: Arc::new(essay_service),
        sheet_layout: settings.sheet.clone(),
        group_switch_policy: settings.session.group_switch_policy,
        scaffold_config: scaffold_config.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    tracing::info!(
        %addr,
        environment = %environment,
        grid = %grid,
        pool_width = settings.extraction.pool_width,
        scaffold = scaffold_config.enabled,
        "Server initialized"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
