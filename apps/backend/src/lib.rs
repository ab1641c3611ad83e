pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;
pub mod timers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::session::{SessionHub, SharedHub};
use crate::store::{DeckStore, JsonFileStore};

/// Deck store shared by all handlers.
pub type SharedStore = Arc<Mutex<Box<dyn DeckStore>>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub sessions: SharedHub,
}

impl AppState {
    pub fn new(store: impl DeckStore + 'static) -> Self {
        let store: Box<dyn DeckStore> = Box::new(store);
        Self {
            store: Arc::new(Mutex::new(store)),
            sessions: SessionHub::shared(),
        }
    }
}

/// Build the router with every endpoint.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Deck routes
        .route("/api/decks", get(routes::decks::list).post(routes::decks::create))
        .route(
            "/api/decks/:id",
            get(routes::decks::get)
                .put(routes::decks::update)
                .delete(routes::decks::delete),
        )
        .route(
            "/api/decks/:id/words/:word_id",
            delete(routes::decks::delete_word),
        )
        .route("/api/decks/:id/import", post(routes::decks::import))
        .route("/api/decks/:id/export", get(routes::decks::export))
        .route("/api/decks/:id/range", get(routes::decks::range))
        // Session routes
        .route(
            "/api/session",
            get(routes::session::current)
                .post(routes::session::start)
                .delete(routes::session::quit),
        )
        .route("/api/session/answer", post(routes::session::answer))
        .route("/api/session/mistake", post(routes::session::mistake))
        .route(
            "/api/session/mistake/resolve",
            post(routes::session::resolve_mistake),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), "Opening deck store...");
    let state = AppState::new(JsonFileStore::open(&config.data_dir));

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
