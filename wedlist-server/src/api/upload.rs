//! CSV guest list upload

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, DefaultBodyLimit, Multipart, Path,
        State,
    },
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use tracing::debug;
use wedlist_common::db::Guest;
use wedlist_common::Error;

use super::CurrentUser;
use crate::error::ApiResult;
use crate::import;
use crate::AppState;

/// Multipart field carrying the CSV
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub guests: Vec<Guest>,
}

/// POST /api/weddings/:weddingId/guests/upload
///
/// Ownership is checked before the body is read, so a foreign wedding is a
/// 404 regardless of the upload's content.
pub async fn upload_guests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let Path(wedding_id) = path?;
    let wedding = state.repo.owned_wedding(user.id(), wedding_id).await?;
    let mut multipart = multipart?;

    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            debug!(
                "Receiving guest CSV {:?} for wedding {}",
                field.file_name(),
                wedding.id
            );
            file = Some(field.bytes().await?);
            break;
        }
    }

    let bytes = file.ok_or_else(|| Error::validation("No file uploaded"))?;
    let outcome = import::ingest(&state.repo, &wedding, &bytes).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: format!("Successfully imported {} guests", outcome.imported_count),
            guests: outcome.guests,
        }),
    ))
}

/// Upload route, with the body capped at `max_upload_bytes`
pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/api/weddings/:id/guests/upload",
        post(upload_guests).layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}
