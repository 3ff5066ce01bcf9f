//! Password reset codes.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};

use crate::constants::{RESET_CODE_ALPHABET, RESET_CODE_LENGTH, RESET_CODE_TTL_MINUTES};

/// A freshly issued reset code and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ResetCode {
    /// Issue a new code at `now`, drawn from the operating system CSPRNG.
    pub fn issue(now: DateTime<Utc>) -> Self {
        let code = (0..RESET_CODE_LENGTH)
            .map(|_| {
                let idx = OsRng.gen_range(0..RESET_CODE_ALPHABET.len());
                char::from(RESET_CODE_ALPHABET[idx])
            })
            .collect();

        Self {
            code,
            issued_at: now,
            expires_at: now + Duration::minutes(RESET_CODE_TTL_MINUTES),
        }
    }
}
