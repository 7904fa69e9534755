//! Communication log endpoints

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use wedlist_common::db::{CommunicationLog, NewCommunicationLog};

use super::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/weddings/:weddingId/communications (newest first)
pub async fn list_communications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<CommunicationLog>>> {
    let Path(wedding_id) = path?;
    Ok(Json(
        state.repo.list_communications(user.id(), wedding_id).await?,
    ))
}

/// POST /api/weddings/:weddingId/communications
///
/// Records that a message went out; nothing is actually sent.
pub async fn log_communication(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewCommunicationLog>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommunicationLog>)> {
    let Path(wedding_id) = path?;
    let Json(entry) = body?;
    let log = state
        .repo
        .log_communication(user.id(), wedding_id, &entry)
        .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub fn communication_routes() -> Router<AppState> {
    Router::new().route(
        "/api/weddings/:id/communications",
        get(list_communications).post(log_communication),
    )
}
