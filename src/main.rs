use std::sync::Arc;

use sound_decisions::{
    config::Config,
    routes::{create_router, AppState},
    services::{load_snapshot, CsvSnapshotSource},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sound_decisions=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Catalog and matrix are loaded once and stay immutable while serving
    let source = CsvSnapshotSource::new(&config.catalog_path, &config.similarity_path);
    let snapshot = load_snapshot(&source).await?;

    let state = Arc::new(AppState::new(snapshot, &config));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
