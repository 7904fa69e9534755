//! wedlist-server library interface
//!
//! Exposes the router and state so integration tests can drive the service
//! without binding a socket.

pub mod api;
pub mod cli;
pub mod db;
pub mod error;
pub mod import;

pub use crate::error::{ApiError, ApiResult};

use axum::{middleware, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use wedlist_common::config::DEFAULT_MAX_UPLOAD_BYTES;

use crate::db::Repository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Ownership-scoped data access
    pub repo: Repository,
    /// Cap on CSV upload request bodies
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Build application router
///
/// Everything under `/api` except the RSVP routes requires a caller identity.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(api::auth_routes())
        .merge(api::wedding_routes())
        .merge(api::guest_routes())
        .merge(api::upload_routes(state.max_upload_bytes))
        .merge(api::category_routes())
        .merge(api::communication_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_user,
        ));

    Router::new()
        .merge(protected)
        .merge(api::health_routes())
        .merge(api::rsvp_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
