/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The access guard verifies the token and stores it in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Token verification and the user lookup live in middleware/services
 * - This file is the contract between the two sides
 */
use crate::services::auth::identity::{Role, SubjectId};

/// Value `subject_of` returns when no guard ran for the request.
pub const ABSENT_SUBJECT: i64 = -1;

/// Context attached to every request that passed an access guard.
///
/// - `subject` is the user id from the token's `sub` claim, confirmed to exist
/// - `role` is read from the user record at request time, not from the token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub subject: SubjectId,
    pub role: Role,
}

impl AuthCtx {
    pub fn new(subject: SubjectId, role: Role) -> Self {
        Self { subject, role }
    }
}
