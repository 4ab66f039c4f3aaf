/*
 * Responsibility
 * - /users handlers: register, login, refresh, me
 * - DTO validation → store / token service calls
 * - Login never reveals which of email or password was wrong
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::api::v1::dto::users::{
    LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, UserProfile,
};
use crate::api::v1::extractors::{AuthCtxExtractor, JsonBody};
use crate::error::AppError;
use crate::repos::user_repo::NewUser;
use crate::services::auth::identity::Role;
use crate::services::auth::password::{
    hash_password_async, verify_dummy_password_async, verify_password_async,
};
use crate::services::auth::token_service::TokenKind;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let email = req.normalized_email();

    // Checked before hashing so a duplicate costs no Argon2 work.
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("email already registered"));
    }

    let password_hash = hash_password_async(req.password).await?;
    let row = state
        .users
        .create(NewUser {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email,
            phone_number: req.phone_number.trim().to_string(),
            role: Role::Customer,
            password_hash,
        })
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Conflict(_) => AppError::conflict("email already registered"),
            other => other,
        })?;

    tracing::info!(user_id = row.id, "user registered");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;
    let email = req.normalized_email();

    let Some(user) = state.users.find_by_email(&email).await? else {
        verify_dummy_password_async(req.password).await;
        tracing::info!("login failed: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password_async(user.password_hash.clone(), req.password).await {
        tracing::info!(user_id = user.id, "login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let subject = user.subject().ok_or_else(|| {
        tracing::error!(user_id = user.id, "stored user id is not a valid subject");
        AppError::Internal
    })?;

    let pair = state.tokens.issue_pair(subject)?;
    Ok(Json(TokenResponse {
        access_token: pair.access_token,
        refresh_token: Some(pair.refresh_token),
        token_type: pair.token_type.to_string(),
        expires_in: pair.expires_in,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let verified = state
        .tokens
        .validate(&req.refresh_token, TokenKind::Refresh)
        .inspect_err(|err| tracing::warn!(error = %err, "refresh token rejected"))?;

    match state.users.find_by_id(verified.subject).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!(subject = %verified.subject, "refresh for unknown subject");
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            tracing::error!(error = ?err, "user lookup failed during refresh");
            return Err(AppError::Unauthorized);
        }
    }

    let access_token = state.tokens.issue(verified.subject, TokenKind::Access)?;
    Ok(Json(TokenResponse {
        access_token,
        refresh_token: None,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl_seconds(TokenKind::Access),
    }))
}

pub async fn me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserProfile>, AppError> {
    let row = state
        .users
        .find_by_id(ctx.subject)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(row.into()))
}
