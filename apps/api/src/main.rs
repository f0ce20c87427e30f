mod agents;
mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agents::AgentCatalog;
use crate::config::Config;
use crate::generation::orchestrator::ContentOrchestrator;
use crate::generation::team_context::TeamDirectory;
use crate::layout::{resolve_fonts, LayoutEngine, LayoutSettings, DEFAULT_FAMILIES, DEFAULT_FONT_DIRS};
use crate::llm_client::{ModelClient, OllamaClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DocumentStore, LocalDirStore, S3Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting docgen API v{}", env!("CARGO_PKG_VERSION"));

    // Agent catalog and team descriptions (read-only for the process lifetime)
    let catalog = Arc::new(AgentCatalog::builtin());
    let teams = Arc::new(TeamDirectory::load(&config.team_descriptions_file));
    info!("Loaded {} team description(s)", teams.len());

    // Model client
    let model: Arc<dyn ModelClient> = Arc::new(OllamaClient::new(
        config.ollama_base_url.clone(),
        config.ollama_model.clone(),
        config.model_timeout,
    ));
    info!(
        "Model client initialized (model: {}, timeout: {:?})",
        model.model_name(),
        config.model_timeout
    );

    let orchestrator = ContentOrchestrator::new(catalog.clone(), teams, model.clone());

    // Fonts are resolved once; parsing TrueType files is blocking work
    let font_dirs: Vec<PathBuf> = config
        .font_dirs
        .clone()
        .unwrap_or_else(|| DEFAULT_FONT_DIRS.iter().map(PathBuf::from).collect());
    let fonts = tokio::task::spawn_blocking(move || resolve_fonts(&font_dirs, DEFAULT_FAMILIES))
        .await?;
    let layout = Arc::new(LayoutEngine::new(
        Arc::new(fonts),
        LayoutSettings {
            place: config.document_place.clone(),
            letterhead: Some(config.letterhead_path()),
        },
    ));

    // Document store: S3 when fully configured, local directory otherwise
    let store: Arc<dyn DocumentStore> = match &config.s3 {
        Some(s3) => Arc::new(S3Store::connect(s3).await),
        None => Arc::new(LocalDirStore::new(config.output_dir.clone())),
    };
    info!("Documents will be stored in {}", store.describe());

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog,
        orchestrator,
        layout,
        store,
        model,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
