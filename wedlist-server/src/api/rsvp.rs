//! Public RSVP endpoints
//!
//! No identity is required; the RSVP code is the only key.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use wedlist_common::db::{Guest, RsvpSubmission, WeddingPublicView};

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/rsvp/:rsvpCode
pub async fn rsvp_lookup(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<WeddingPublicView>> {
    Ok(Json(state.repo.rsvp_lookup(&code).await?))
}

/// POST /api/rsvp/:rsvpCode/submit
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: Result<Json<RsvpSubmission>, JsonRejection>,
) -> ApiResult<Json<Guest>> {
    let Json(submission) = body?;
    Ok(Json(state.repo.submit_rsvp(&code, &submission).await?))
}

pub fn rsvp_routes() -> Router<AppState> {
    Router::new()
        .route("/api/rsvp/:code", get(rsvp_lookup))
        .route("/api/rsvp/:code/submit", post(submit_rsvp))
}
