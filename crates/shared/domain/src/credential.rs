//! Stored credential value object.
//!
//! Accounts created by the legacy system hold their password verbatim in
//! `password_hash`. That is a known security defect: plaintext secrets are
//! compared with plain string equality. It is kept as the default scheme so
//! existing rows keep working, and [`CredentialScheme::Argon2`] is available
//! for new writes. Verification understands both formats.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::ARGON2_PHC_PREFIX;
use crate::error::{DomainError, DomainResult};

/// How newly written credentials are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialScheme {
    /// Store the secret verbatim (legacy parity, insecure)
    #[default]
    Plaintext,
    /// Store an Argon2id PHC string
    Argon2,
}

impl CredentialScheme {
    /// Parse a configuration value; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plaintext" | "plain" => Some(CredentialScheme::Plaintext),
            "argon2" | "argon2id" => Some(CredentialScheme::Argon2),
            _ => None,
        }
    }
}

/// The `password_hash` column of an account.
#[derive(Clone, Default)]
pub struct Credential {
    stored: Option<String>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("stored", &"[REDACTED]")
            .finish()
    }
}

impl Credential {
    /// Wrap the column value read from the store.
    pub fn from_stored(stored: Option<String>) -> Self {
        Self { stored }
    }

    /// Produce the column value for a new secret under `scheme`.
    pub fn seal(plain_text: &str, scheme: CredentialScheme) -> DomainResult<String> {
        match scheme {
            CredentialScheme::Plaintext => Ok(plain_text.to_string()),
            CredentialScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(plain_text.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))
            }
        }
    }

    /// Check a candidate secret against the stored value.
    ///
    /// An account without a stored credential never matches. Legacy values
    /// are compared with exact, case-sensitive equality.
    pub fn matches(&self, candidate: &str) -> bool {
        let Some(stored) = self.stored.as_deref() else {
            return false;
        };

        if stored.starts_with(ARGON2_PHC_PREFIX) {
            PasswordHash::new(stored)
                .map(|parsed| {
                    Argon2::default()
                        .verify_password(candidate.as_bytes(), &parsed)
                        .is_ok()
                })
                .unwrap_or(false)
        } else {
            stored == candidate
        }
    }
}
