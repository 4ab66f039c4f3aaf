/*
 * Responsibility
 * - Accept the Path segment as a String and turn it into a typed internal id
 * - Anything that is not a positive integer becomes a 400 in the shared error shape
 *
 * Keeps here
 *  - ResourceId<T> (the generic body)
 *  - impl FromRequestParts<S> for ResourceId<T>
 *  - the parse function
 *
 * Keeps out
 *  - concrete resource names (Shop / ShopCategory), see types.rs
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

pub struct ResourceId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> ResourceId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

// Derives would put bounds on T; the tag types are uninhabited enums.
impl<T> Clone for ResourceId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceId<T> {}

pub(super) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

impl<S, T> FromRequestParts<S> for ResourceId<T>
where
    S: Send + Sync,
    T: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("invalid id"))?;
        parse_id(&raw)
            .map(Self::new)
            .ok_or_else(|| AppError::bad_request("invalid id"))
    }
}

impl<T> std::fmt::Debug for ResourceId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceId").field("id", &self.id).finish()
    }
}
