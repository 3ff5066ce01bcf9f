//! Domain-level constants.
//!
//! These constants define business rules and the user-facing strings of the
//! referral flow.

// =============================================================================
// Password Reset
// =============================================================================

/// Number of characters in a reset code
pub const RESET_CODE_LENGTH: usize = 6;

/// Minutes a reset code stays valid after issuance
pub const RESET_CODE_TTL_MINUTES: i64 = 60;

/// Alphabet reset codes are drawn from
pub const RESET_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// =============================================================================
// Credentials
// =============================================================================

/// Prefix of PHC strings produced by Argon2
pub const ARGON2_PHC_PREFIX: &str = "$argon2";

// =============================================================================
// Referrer Flow
// =============================================================================

/// Placeholder for any handoff field that could not be resolved
pub const HANDOFF_PLACEHOLDER: &str = "N/A";

/// Session storage key the confirmation step reads the handoff from
pub const HANDOFF_STORAGE_KEY: &str = "mintingsData";

/// Path of the confirmation step
pub const CONFIRM_STEP_PATH: &str = "/referrer/confirm";

/// Shown when the primary account lookup has no record for the referrer
pub const MSG_REFERRER_NOT_FOUND: &str = "ไม่พบข้อมูลผู้แนะนำ";

/// Shown when the primary lookup failed for an unclassified reason
pub const MSG_LOAD_FAILED: &str = "เกิดข้อผิดพลาดในการโหลดข้อมูล";

/// Notice attached to the fallback name when the 3K directory has no record
pub const MSG_THREE_K_NO_RECORD: &str = "ไม่พบข้อมูลชื่อจากระบบ 3K";

/// Notice attached to the fallback name when the 3K directory failed
pub const MSG_THREE_K_UNAVAILABLE: &str = "ไม่สามารถเชื่อมต่อระบบ 3K ได้";
