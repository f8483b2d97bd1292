use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use crate::config::StoryviewConfig;
use crate::images::StorageResolver;
use crate::page::PageBuilder;
use crate::storage::SqliteStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub pages: PageBuilder,
}

pub fn router(state: Arc<AppState>, assets: &Path) -> Router {
    Router::new()
        .route("/", get(routes::story_page))
        .route("/story/{id}", get(routes::story_page))
        .route("/api/page", get(routes::page_json))
        .route("/healthz", get(routes::healthz))
        .fallback_service(ServeDir::new(assets))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: &StoryviewConfig) -> anyhow::Result<()> {
    let store = SqliteStore::open(Path::new(&config.database))?;
    let images = StorageResolver::new(config.images.download_base.clone());
    let state = Arc::new(AppState {
        pages: PageBuilder::new(Arc::new(store), Arc::new(images), config.render_options()),
    });

    let app = router(state, Path::new(&config.assets));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {} (collection: {})", addr, config.collection);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
