//! Wedding endpoints: create, list, read, update, statistics

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use wedlist_common::db::{NewWedding, Wedding, WeddingPatch};
use wedlist_common::stats::WeddingStats;

use super::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// POST /api/weddings
///
/// Generates the RSVP code and seeds the default guest categories.
pub async fn create_wedding(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<NewWedding>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Wedding>)> {
    let Json(new) = body?;
    let wedding = state.repo.create_wedding(user.id(), &new).await?;
    Ok((StatusCode::CREATED, Json(wedding)))
}

/// GET /api/weddings
pub async fn list_weddings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Wedding>>> {
    Ok(Json(state.repo.list_weddings(user.id()).await?))
}

/// GET /api/weddings/:id
pub async fn get_wedding(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Wedding>> {
    let Path(id) = path?;
    Ok(Json(state.repo.owned_wedding(user.id(), id).await?))
}

/// PATCH /api/weddings/:id
pub async fn update_wedding(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<WeddingPatch>, JsonRejection>,
) -> ApiResult<Json<Wedding>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    Ok(Json(state.repo.update_wedding(user.id(), id, patch).await?))
}

/// GET /api/weddings/:weddingId/stats
pub async fn wedding_stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<WeddingStats>> {
    let Path(wedding_id) = path?;
    Ok(Json(state.repo.wedding_stats(user.id(), wedding_id).await?))
}

pub fn wedding_routes() -> Router<AppState> {
    Router::new()
        .route("/api/weddings", get(list_weddings).post(create_wedding))
        .route("/api/weddings/:id", get(get_wedding).patch(update_wedding))
        .route("/api/weddings/:id/stats", get(wedding_stats))
}
