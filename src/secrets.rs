//! Hashed-secret handling
//!
//! Credential fields in the settings record hold one-way hashes, never
//! plaintext. This module recognizes the accepted hash formats for
//! validation and generates new hashes for the `hash-pw` command.
//! Password *verification* is the host runtime's job.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, SaltString, rand_core::OsRng};

use crate::error::HashError;

/// Recognized hashed-secret formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFormat {
    /// Bcrypt-shaped hash (`$2a$`/`$2b$`/`$2x$`/`$2y$` cost-prefixed form)
    Bcrypt,
    /// PHC string (e.g. argon2 output)
    Phc,
}

/// Recognizes the format of a hashed secret.
///
/// Returns `None` when the value is not shaped like any accepted hash -
/// in particular for plaintext passwords.
#[must_use]
pub fn recognize(value: &str) -> Option<HashFormat> {
    if is_bcrypt_shaped(value) {
        return Some(HashFormat::Bcrypt);
    }
    if PasswordHash::new(value).is_ok() {
        return Some(HashFormat::Phc);
    }
    None
}

/// Hashes a password into a PHC string (argon2id, random salt).
///
/// # Errors
///
/// Returns an error if the hashing backend rejects the input.
pub fn hash_password(plain: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon = Argon2::default();
    let hash = argon
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| HashError::HashingFailed(err.to_string()))?;
    Ok(hash.to_string())
}

/// Checks the `$2<variant>$<cost>$<payload>` bcrypt shape.
///
/// Shape only: cost must be two ASCII digits and the payload non-empty in
/// the bcrypt alphabet. Whether the digest itself is sound is for the host
/// to decide when it verifies a login.
fn is_bcrypt_shaped(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("$2") else {
        return false;
    };

    let mut chars = rest.chars();
    if !matches!(chars.next(), Some('a' | 'b' | 'x' | 'y')) {
        return false;
    }
    if chars.next() != Some('$') {
        return false;
    }

    let Some((cost, payload)) = chars.as_str().split_once('$') else {
        return false;
    };
    if cost.len() != 2 || !cost.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    !payload.is_empty()
        && payload
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'/')
}

// ============================================================================
// Tests
// ============================================================================
