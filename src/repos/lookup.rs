//! Read capabilities the auth layer consumes.
//!
//! The access guard only needs `UserLookup`, the ownership check only needs
//! `ResourceLookup<R>`. Full stores extend these.
use async_trait::async_trait;

use crate::repos::error::RepoResult;
use crate::repos::user_repo::UserRow;
use crate::services::auth::identity::SubjectId;

#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_id(&self, id: SubjectId) -> RepoResult<Option<UserRow>>;
}

#[async_trait]
pub trait ResourceLookup<R>: Send + Sync
where
    R: Send,
{
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<R>>;
}
