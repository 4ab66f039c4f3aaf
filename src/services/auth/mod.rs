pub mod identity;
pub mod jwt;
pub mod ownership;
pub mod password;
pub mod token_service;

pub use identity::{Role, SubjectId};
pub use token_service::{TokenKind, TokenService};
