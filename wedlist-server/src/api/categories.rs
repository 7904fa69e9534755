//! Guest category endpoints

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use wedlist_common::db::{CategoryPatch, GuestCategory, NewCategory};

use super::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<GuestCategory>>> {
    let Path(wedding_id) = path?;
    Ok(Json(state.repo.list_categories(user.id(), wedding_id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GuestCategory>)> {
    let Path(wedding_id) = path?;
    let Json(new) = body?;
    let category = state.repo.create_category(user.id(), wedding_id, &new).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CategoryPatch>, JsonRejection>,
) -> ApiResult<Json<GuestCategory>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    Ok(Json(state.repo.update_category(user.id(), id, patch).await?))
}

/// Guests filed under the category keep their row with `categoryId` cleared
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.repo.delete_category(user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/weddings/:id/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/categories/:id",
            patch(update_category).delete(delete_category),
        )
}
