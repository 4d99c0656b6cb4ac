use std::sync::Arc;

use anyhow::Result;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staff_review_api::AppState;
use staff_review_storage::{postgres, PgEmployeeStore, PgReviewStore};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staff_review=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting staff review server");

    // Load configuration
    let config = config::Config::load()?;
    staff_review_api::set_error_mode(config.error_mode());
    tracing::info!(env = %config.env, "Configuration loaded");

    // Initialize database pool and schema
    let db_pool = postgres::create_pool(&config.database_url).await?;
    postgres::run_migrations(&db_pool).await?;
    tracing::info!("Database pool initialized");

    // Build application state
    let state = AppState::new(
        Arc::new(PgEmployeeStore::new(db_pool.clone())),
        Arc::new(PgReviewStore::new(db_pool)),
        config.auth_strategy(),
    );

    let app = Router::new()
        .route("/", get(banner))
        .nest("/api", staff_review_api::routes(state))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn banner() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Staff Review API",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
