/*!
 * Authentication context
 *
 * Responsibility:
 * - Carry the authenticated subject (AuthCtx) from the access guard to handlers
 * - axum-specific code stays in core, the type definitions in types
 *
 * Public API:
 * - AuthCtx, ABSENT_SUBJECT
 * - with_subject / subject_of
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::{AuthCtxExtractor, subject_of, with_subject};
pub use types::{ABSENT_SUBJECT, AuthCtx};
