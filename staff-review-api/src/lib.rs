pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod services;

pub use dto::*;
pub use error::{set_error_mode, ApiError, ApiResult, ErrorMode};
pub use middleware::{issue_token, AuthStrategy, AuthUser};
pub use services::{EmployeeService, ReviewService};

use std::sync::Arc;

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;

use staff_review_core::{EmployeeStore, ReviewStore};

/// Shared per-request dependencies: the entity services over their store
/// handles, and the configured auth strategy. Services are stateless, so the
/// whole state is cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeService,
    pub reviews: ReviewService,
    pub auth: AuthStrategy,
}

impl AppState {
    pub fn new(
        employee_store: Arc<dyn EmployeeStore>,
        review_store: Arc<dyn ReviewStore>,
        auth: AuthStrategy,
    ) -> Self {
        Self {
            employees: EmployeeService::new(employee_store),
            reviews: ReviewService::new(review_store),
            auth,
        }
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route not found - {uri}"))
}

/// Assembles the API router. Listing and report routes run behind the
/// configured auth strategy; health does not.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/employees",
            get(handlers::employees::list).post(handlers::employees::create),
        )
        .route("/employees/cursor", get(handlers::employees::list_with_cursor))
        .route(
            "/employees/:id",
            get(handlers::employees::get).delete(handlers::employees::delete),
        )
        .route("/reviews", post(handlers::reviews::create))
        .route("/reviews/top-performers", get(handlers::reviews::top_performers))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
}
