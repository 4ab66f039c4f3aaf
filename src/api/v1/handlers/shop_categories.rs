/*
 * Responsibility
 * - /shops/category handlers, mounted behind the admin guard
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::api::v1::dto::shop_categories::{ShopCategoryRequest, ShopCategoryResponse};
use crate::api::v1::extractors::{JsonBody, ShopCategoryId};
use crate::error::AppError;
use crate::state::AppState;

const CATEGORY: &str = "shop category";

pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ShopCategoryRequest>,
) -> Result<(StatusCode, Json<ShopCategoryResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let row = state.categories.create(req.name()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_category(
    State(state): State<AppState>,
    category_id: ShopCategoryId,
) -> Result<Json<ShopCategoryResponse>, AppError> {
    let row = state
        .categories
        .find_by_id(category_id.id)
        .await?
        .ok_or(AppError::not_found(CATEGORY))?;
    Ok(Json(row.into()))
}

pub async fn update_category(
    State(state): State<AppState>,
    category_id: ShopCategoryId,
    JsonBody(req): JsonBody<ShopCategoryRequest>,
) -> Result<Json<ShopCategoryResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let row = state
        .categories
        .update(category_id.id, req.name())
        .await?
        .ok_or(AppError::not_found(CATEGORY))?;
    Ok(Json(row.into()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    category_id: ShopCategoryId,
) -> Result<StatusCode, AppError> {
    if state.categories.delete(category_id.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(CATEGORY))
    }
}
