/*
 * Responsibility
 * - /shops handlers
 * - Mutations load the shop through authorize_owner before writing
 */
use axum::{Json, body::Bytes, extract::State, http::StatusCode};

use crate::api::v1::dto::shops::{CreateShopRequest, ShopResponse, UpdateShopRequest};
use crate::api::v1::extractors::{AuthCtxExtractor, JsonBody, ShopId};
use crate::error::AppError;
use crate::repos::shop_repo::ShopRow;
use crate::services::auth::ownership::authorize_owner;
use crate::state::AppState;

const SHOP: &str = "shop";

async fn ensure_category_exists(state: &AppState, category_id: i64) -> Result<(), AppError> {
    state
        .categories
        .find_by_id(category_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::not_found("shop category"))
}

pub async fn create_shop(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateShopRequest>,
) -> Result<(StatusCode, Json<ShopResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;
    ensure_category_exists(&state, req.category_id).await?;

    let row = state.shops.create(req.into_new_shop(ctx.subject)).await?;
    tracing::info!(shop_id = row.id, owner = %ctx.subject, "shop created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_shop(
    State(state): State<AppState>,
    shop_id: ShopId,
) -> Result<Json<ShopResponse>, AppError> {
    let row = state
        .shops
        .find_by_id(shop_id.id)
        .await?
        .ok_or(AppError::not_found(SHOP))?;
    Ok(Json(row.into()))
}

pub async fn update_shop(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    shop_id: ShopId,
    body: Bytes,
) -> Result<Json<ShopResponse>, AppError> {
    authorize_owner(state.shops.as_ref(), shop_id.id, ctx.subject, SHOP, |shop: &ShopRow| {
        shop.user_id
    })
    .await?;

    // Parsed only after the owner check: a non-owner gets 403 whatever the body holds.
    let req: UpdateShopRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::bad_request(e.to_string()))?;
    req.validate().map_err(AppError::bad_request)?;
    if let Some(category_id) = req.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let row = state
        .shops
        .update(shop_id.id, req.into_patch())
        .await?
        .ok_or(AppError::not_found(SHOP))?;
    Ok(Json(row.into()))
}

pub async fn delete_shop(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    shop_id: ShopId,
) -> Result<StatusCode, AppError> {
    authorize_owner(state.shops.as_ref(), shop_id.id, ctx.subject, SHOP, |shop: &ShopRow| {
        shop.user_id
    })
    .await?;

    if state.shops.delete(shop_id.id).await? {
        tracing::info!(shop_id = shop_id.id, owner = %ctx.subject, "shop deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(SHOP))
    }
}
