//! Guest endpoints

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use wedlist_common::db::{Guest, GuestInput, GuestPatch};

use super::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/weddings/:weddingId/guests
pub async fn list_guests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Guest>>> {
    let Path(wedding_id) = path?;
    Ok(Json(state.repo.list_guests(user.id(), wedding_id).await?))
}

/// POST /api/weddings/:weddingId/guests
///
/// The wedding id in the path is authoritative.
pub async fn create_guest(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<GuestInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Guest>)> {
    let Path(wedding_id) = path?;
    let Json(input) = body?;
    let guest = state
        .repo
        .create_guest(user.id(), wedding_id, input.into_new_guest(wedding_id))
        .await?;

    Ok((StatusCode::CREATED, Json(guest)))
}

/// PATCH /api/guests/:id
pub async fn update_guest(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<GuestPatch>, JsonRejection>,
) -> ApiResult<Json<Guest>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    Ok(Json(state.repo.update_guest(user.id(), id, patch).await?))
}

/// DELETE /api/guests/:id
pub async fn delete_guest(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.repo.delete_guest(user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn guest_routes() -> Router<AppState> {
    Router::new()
        .route("/api/weddings/:id/guests", get(list_guests).post(create_guest))
        .route("/api/guests/:id", patch(update_guest).delete(delete_guest))
}
