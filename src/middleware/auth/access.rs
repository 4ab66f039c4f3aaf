//! Access guards: verify the bearer access token, confirm the subject still exists,
//! then put `AuthCtx` into request extensions.
//!
//! - `apply` guards a router for any authenticated user
//! - `apply_admin` additionally requires the admin role
//!
//! Both are attached with `route_layer`, so unmatched paths still fall through as 404
//! instead of turning into 401.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::auth_ctx::{AuthCtx, with_subject};
use crate::error::AppError;
use crate::repos::lookup::UserLookup;
use crate::services::auth::identity::Role;
use crate::services::auth::token_service::{TokenKind, TokenService};
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot take State in axum 0.8, so the state is passed explicitly
    router.route_layer(middleware::from_fn_with_state(state, require_user))
}

pub fn apply_admin(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, require_admin))
}

async fn require_user(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = authenticate(&state.tokens, state.users.as_ref(), req.headers()).await?;
    Ok(next.run(with_subject(req, ctx)).await)
}

async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = authenticate(&state.tokens, state.users.as_ref(), req.headers()).await?;
    if ctx.role != Role::Admin {
        tracing::warn!(subject = %ctx.subject, role = %ctx.role, "admin route refused");
        return Err(AppError::Forbidden("admin role required"));
    }
    Ok(next.run(with_subject(req, ctx)).await)
}

/// Resolve the caller from the `Authorization` header.
///
/// Every failure is a 401 with the same body. A store failure also fails closed.
pub async fn authenticate<L>(
    tokens: &TokenService,
    users: &L,
    headers: &HeaderMap,
) -> Result<AuthCtx, AppError>
where
    L: UserLookup + ?Sized,
{
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;

    let verified = match tokens.validate(token, TokenKind::Access) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "access token rejected");
            return Err(AppError::Unauthorized);
        }
    };

    let user = match users.find_by_id(verified.subject).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(subject = %verified.subject, "token subject no longer exists");
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            tracing::error!(error = ?err, subject = %verified.subject, "user lookup failed during authentication");
            return Err(AppError::Unauthorized);
        }
    };

    Ok(AuthCtx::new(verified.subject, user.role()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
