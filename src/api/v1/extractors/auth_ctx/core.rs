use axum::extract::FromRequestParts;
use axum::http::{Extensions, Request, request::Parts};

use crate::error::AppError;

use super::{ABSENT_SUBJECT, AuthCtx};

/// Attach `ctx` to the request and hand back the derived request.
///
/// The request is taken by value, so nothing else can observe the old state;
/// there is no shared context to mutate.
pub fn with_subject<B>(mut req: Request<B>, ctx: AuthCtx) -> Request<B> {
    req.extensions_mut().insert(ctx);
    req
}

/// Subject attached by the guard, or `ABSENT_SUBJECT` when none was attached.
pub fn subject_of(extensions: &Extensions) -> i64 {
    extensions
        .get::<AuthCtx>()
        .map(|ctx| ctx.subject.get())
        .unwrap_or(ABSENT_SUBJECT)
}

/// Extractor handing `AuthCtx` to handlers.
/// Assumes the access guard already inserted it into request extensions;
/// if it is missing (route not behind a guard) the request is rejected with 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}
