//! Reel Server
//!
//! REST API for the Reel short-video demo: feed, profiles, comments and the
//! inbox, backed by an in-memory store. All state resets on restart.

mod config;
mod error;
mod extractors;
mod handlers;
mod seed;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use reel_types::ApiResponse;
use std::any::Any;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use services::{ActivityService, StatsService};
use storage::{MemoryStorage, Storage};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub activity: Arc<ActivityService>,
    pub stats: Arc<StatsService>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            activity: Arc::new(ActivityService::new(storage.clone())),
            stats: Arc::new(StatsService::new(storage.clone())),
            storage,
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        eprintln!("[PANIC] at {:?}: {}", location, panic_message(info.payload()));
        tracing::error!("PANIC at {:?}: {}", location, panic_message(info.payload()));
    }));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] {:#}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Reel Server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        "Config loaded: bind={}, seed={}",
        config.bind_address, config.seed_demo_data
    );

    let storage = if config.seed_demo_data {
        info!("Loading demo data...");
        MemoryStorage::seeded(config.current_user_id.clone())
    } else {
        MemoryStorage::new(config.current_user_id.clone())
    };
    info!("Viewer (current user): {}", storage.viewer_id());
    let state = AppState::new(Arc::new(storage));

    if let Some(dir) = &config.static_dir {
        info!("Static files directory: {}", dir);
    }
    let app = build_router(state, config.static_dir.as_deref());

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn build_router(state: AppState, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes());

    // SPA fallback - unknown paths serve index.html when a bundle is present
    let router = match static_dir {
        Some(dir) => {
            let index = PathBuf::from(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        None => router.fallback(handlers::not_found),
    };

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/videos",
            get(handlers::videos::list).post(handlers::videos::create),
        )
        .route(
            "/videos/:id",
            get(handlers::videos::get)
                .patch(handlers::videos::update)
                .delete(handlers::videos::delete),
        )
        .route("/videos/:id/like", post(handlers::videos::like))
        .route("/videos/:id/unlike", post(handlers::videos::unlike))
        .route("/videos/:id/view", post(handlers::videos::view))
        .route(
            "/videos/:id/comments",
            get(handlers::comments::list).post(handlers::comments::create),
        )
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/users/:id",
            get(handlers::users::get).patch(handlers::users::update),
        )
        .route("/users/:id/follow", post(handlers::users::follow))
        .route("/users/:id/unfollow", post(handlers::users::unfollow))
        .route(
            "/users/:id/notifications/read",
            post(handlers::users::read_all_notifications),
        )
        .route("/comments/:id", delete(handlers::comments::delete))
        .route("/comments/:id/like", post(handlers::comments::like))
        .route("/comments/:id/unlike", post(handlers::comments::unlike))
        .route("/notifications", post(handlers::notifications::create))
        .route("/notifications/:id", get(handlers::notifications::list))
        .route(
            "/notifications/:id/read",
            post(handlers::notifications::mark_read),
        )
        .route("/admin/stats", get(handlers::admin::stats))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    error!("Handler panicked: {}", panic_message(payload.as_ref()));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("Internal server error")),
    )
        .into_response()
}
