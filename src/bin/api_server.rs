// src/bin/api_server.rs

use anyhow::Context;
use image_gallery::transport;
use image_gallery::{
    seed, Config, IdentityResolver, ImageCollection, MemoryVoteStore, PostgresVoteStore,
    VoteLedger, VoteStore, VoteTallyService,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_gallery=debug,api_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // --- Vote ledger ---
    let store: Arc<dyn VoteStore> = match config.database_url.as_deref() {
        Some(url) => {
            info!("Connecting vote ledger to Postgres...");
            Arc::new(PostgresVoteStore::connect(url, config.db_max_connections).await?)
        }
        None => {
            warn!("DATABASE_URL not set; votes are kept in memory and lost on restart");
            Arc::new(MemoryVoteStore::new())
        }
    };

    // --- Tally service; voting stays disabled until identity resolves ---
    let tally = Arc::new(VoteTallyService::new(VoteLedger::new(store)));
    let resolver = IdentityResolver::http(config.ip_lookup_url.clone(), config.ip_lookup_timeout)
        .context("Failed to build identity lookup client")?;
    tally.spawn_identity_resolution(resolver);

    // --- Image collection ---
    let images = if config.seed_gallery {
        ImageCollection::with_seed(seed::default_images())
    } else {
        ImageCollection::new()
    };
    info!("Gallery starts with {} images", images.len());

    let app_state = transport::http::AppState::new(images, tally);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("API server listening on http://{}", config.bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received (Ctrl+C)");
        })
        .await
        .context("Server error")?;

    info!("Graceful shutdown complete");
    Ok(())
}
