use std::error::Error;
use std::sync::Arc;

use decision_ranker::adapters::ai::OpenAIProvider;
use decision_ranker::adapters::http::{app_router, AppState, HttpOptions};
use decision_ranker::adapters::storage::{FileSessionStore, InMemorySessionStore};
use decision_ranker::config::{AppConfig, LogFormat, StorageBackend};
use decision_ranker::ports::{AIProvider, SessionStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    match config.server.log_format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_logging(&config);
    config.validate()?;

    if !config.ai.has_api_key() {
        warn!("DECISION_RANKER__AI__API_KEY not set. AI endpoints will fail with 401.");
    }

    let ai_provider: Arc<dyn AIProvider> =
        Arc::new(OpenAIProvider::new(config.ai.provider_config())?);

    let session_store: Arc<dyn SessionStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.storage.data_dir)),
    };

    let provider = ai_provider.provider_info();
    let state = AppState::new(ai_provider, session_store)
        .with_batch_policy(config.ai.batch_policy)
        .with_batch_deadline(config.ai.batch_deadline());
    let options = HttpOptions {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = app_router(state, &options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        provider = %provider.name,
        model = %provider.model,
        storage = ?config.storage.backend,
        batch_policy = ?config.ai.batch_policy,
        batch_deadline_secs = config.ai.batch_deadline_secs,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down gracefully");
        })
        .await?;

    Ok(())
}
