//! Research Forum Backend
//!
//! REST backend for the R&D Center discussion forum, with key-value document storage in
//! SQLite and Tantivy full-text search.

mod api;
mod config;
mod db;
mod errors;
mod forum;
mod models;
mod search;
mod storage;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, StorageBackend};
use db::SqliteStore;
use forum::ForumStore;
use search::SearchIndex;
use storage::{MemoryStore, Storage};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub forum: Arc<ForumStore<Storage>>,
    pub search: Arc<SearchIndex>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Research Forum Backend");
    tracing::info!("Storage backend: {:?}", config.storage);
    tracing::info!("Index path: {:?}", config.index_path);
    tracing::info!("Like mode: {}", config.like_mode.as_str());
    tracing::info!("Bind address: {}", config.bind_addr);

    let storage = match config.storage {
        StorageBackend::Sqlite => {
            tracing::info!("Database path: {:?}", config.db_path);
            let pool = db::init_database(&config.db_path).await?;
            Storage::Sqlite(SqliteStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; forum content is lost on exit");
            Storage::Memory(MemoryStore::new())
        }
    };

    let forum = Arc::new(ForumStore::new(Arc::new(storage), config.like_mode));
    forum.ensure_initialized().await;

    // Initialize search index
    let search = Arc::new(SearchIndex::open(&config.index_path)?);

    // Build initial search index from storage
    tracing::info!("Building search index...");
    let topics = forum.get_all().await;
    search.rebuild(&topics).await?;

    let state = AppState { forum, search };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let forum_routes = Router::new()
        .route("/topics", get(api::list_topics).post(api::create_topic))
        .route("/topics/{id}", get(api::get_topic))
        .route("/topics/{id}/views", post(api::record_view))
        .route("/topics/{id}/replies", post(api::add_reply))
        .route("/topics/{id}/like", post(api::like_topic))
        .route(
            "/topics/{id}/replies/{reply_id}/like",
            post(api::like_reply),
        )
        .route("/categories", get(api::list_categories))
        .route("/tags", get(api::list_tags))
        .route("/search", get(api::search_topics));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api/forum", forum_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
