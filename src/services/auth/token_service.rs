use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;
use crate::services::auth::identity::SubjectId;
use crate::services::auth::jwt::JwtKeys;

/// Purpose of a token. Carried as the `kind` claim so a refresh token is never accepted
/// where an access token is expected (and vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub kind: TokenKind,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("unexpected token kind: expected {expected:?}, got {actual:?}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("invalid subject claim")]
    InvalidSubject,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Claims that passed validation, converted into application types.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub subject: SubjectId,
    pub kind: TokenKind,
}

/// Service-level return type to keep handlers thin.
#[derive(Clone, Debug)]
pub struct IssuedTokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Issues and validates stateless access/refresh tokens.
///
/// Validity is a function of signature, algorithm, issuer, expiry and kind only.
/// Whether the subject still exists is the caller's concern.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    issuer: String,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            keys: JwtKeys::new(&config.jwt_secret, &config.issuer, config.leeway_seconds),
            issuer: config.issuer.clone(),
            access_ttl_seconds: config.access_token_ttl_seconds,
            refresh_ttl_seconds: config.refresh_token_ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self, kind: TokenKind) -> u64 {
        match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        }
    }

    /// Issue a token of `kind` with the configured lifetime.
    pub fn issue(&self, subject: SubjectId, kind: TokenKind) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, kind, self.ttl_seconds(kind))
    }

    pub fn issue_with_ttl(
        &self,
        subject: SubjectId,
        kind: TokenKind,
        ttl_seconds: u64,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

        let claims = TokenClaims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(ttl),
            kind,
        };

        self.keys.sign(&claims).map_err(|e| {
            tracing::error!(error = %e, "failed to sign JWT");
            TokenError::Signing(e)
        })
    }

    /// Issue an access token and a refresh token for the same subject.
    pub fn issue_pair(&self, subject: SubjectId) -> Result<IssuedTokenPair, TokenError> {
        Ok(IssuedTokenPair {
            access_token: self.issue(subject, TokenKind::Access)?,
            refresh_token: self.issue(subject, TokenKind::Refresh)?,
            token_type: "Bearer",
            expires_in: self.access_ttl_seconds,
        })
    }

    /// Verify `token` and require it to be of the `expected` kind.
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<VerifiedToken, TokenError> {
        let claims: TokenClaims = self.keys.verify(token).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e),
        })?;

        if claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }

        let subject = claims
            .sub
            .parse::<SubjectId>()
            .map_err(|_| TokenError::InvalidSubject)?;

        Ok(VerifiedToken {
            subject,
            kind: claims.kind,
        })
    }
}
