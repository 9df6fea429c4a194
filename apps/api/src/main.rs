use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statejobs_api::config::Config;
use statejobs_api::letter::greeting::{
    EntityNameClassifier, HeuristicNameClassifier, NameClassifier,
};
use statejobs_api::render::PdfRenderer;
use statejobs_api::routes::build_router;
use statejobs_api::scrape::fetch::HttpJobFetcher;
use statejobs_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("statejobs_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting StateJobs helper API v{}", env!("CARGO_PKG_VERSION"));

    // Shared HTTP fetcher with the configured timeout
    let fetcher = Arc::new(HttpJobFetcher::new(
        config.statejobs_base_url.clone(),
        config.fetch_timeout_secs,
    )?);

    // Greeting classifier is selected once at startup
    let classifier: Arc<dyn NameClassifier> = if config.greeting_ner {
        Arc::new(EntityNameClassifier)
    } else {
        info!("Entity greeting rules disabled; using plain heuristic");
        Arc::new(HeuristicNameClassifier)
    };

    // Resolve the primary rendering capability once, not per request
    let renderer = PdfRenderer::resolve(&config);

    let state = AppState {
        config: config.clone(),
        fetcher,
        classifier,
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
