//! Resource ownership check, called at the top of every handler that mutates an owned resource.
use crate::error::AppError;
use crate::repos::lookup::ResourceLookup;
use crate::services::auth::identity::SubjectId;

/// Load `resource_id` and make sure `subject` owns it.
///
/// - absent resource: `NotFound`
/// - `owner_of(&resource) != subject`: `Forbidden`
/// - otherwise the loaded resource is returned so the caller does not fetch it twice
pub async fn authorize_owner<R, L, F>(
    lookup: &L,
    resource_id: i64,
    subject: SubjectId,
    resource: &'static str,
    owner_of: F,
) -> Result<R, AppError>
where
    R: Send,
    L: ResourceLookup<R> + ?Sized,
    F: FnOnce(&R) -> i64,
{
    let Some(found) = lookup.find_by_id(resource_id).await? else {
        return Err(AppError::not_found(resource));
    };

    if owner_of(&found) != subject.get() {
        tracing::warn!(
            resource,
            resource_id,
            subject = %subject,
            "ownership check failed"
        );
        return Err(AppError::Forbidden(
            "you do not have permission to modify this resource",
        ));
    }

    Ok(found)
}
