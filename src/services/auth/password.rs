//! Password hashing (Argon2id, PHC string format).
//!
//! Hashing is deliberately slow, so the async variants run on tokio's blocking pool.
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;

use thiserror::Error;

const MEMORY_COST_KIB: u32 = 15_000;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

// Verified in place of a real hash when the account does not exist,
// so an unknown email costs the same Argon2 run as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no such account").ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("password hashing task failed")]
    Join(#[from] tokio::task::JoinError),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(PasswordError::Params)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `plaintext` with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// `false` on mismatch and on a malformed hash. A wrong password is not an error.
pub fn verify_password(hash: &str, plaintext: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    // Parameters are read back from the PHC string.
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

pub async fn hash_password_async(plaintext: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&plaintext)).await?
}

pub async fn verify_password_async(hash: String, plaintext: String) -> bool {
    match tokio::task::spawn_blocking(move || verify_password(&hash, &plaintext)).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!(error = %e, "password verification task failed");
            false
        }
    }
}

/// Run a full verification against a stand-in hash. Always `false`.
pub async fn verify_dummy_password_async(plaintext: String) -> bool {
    let outcome = tokio::task::spawn_blocking(move || {
        DUMMY_HASH
            .as_deref()
            .is_some_and(|hash| verify_password(hash, &plaintext))
    })
    .await;
    if let Err(e) = outcome {
        tracing::error!(error = %e, "dummy password verification task failed");
    }
    false
}
