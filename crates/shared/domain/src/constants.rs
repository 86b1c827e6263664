//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Message returned when a user is created or renamed with an empty name
pub const NAME_REQUIRED: &str = "name is required";

/// Message returned when a user is created or updated with an empty email
pub const EMAIL_REQUIRED: &str = "email is required";

/// Message returned when an operation is addressed to an empty identifier
pub const ID_REQUIRED: &str = "id is required";

// =============================================================================
// Timestamps
// =============================================================================

/// Fractional-second digits kept on entity timestamps.
///
/// PostgreSQL `timestamptz` stores microseconds, so values are truncated
/// to the same resolution before they ever reach a store.
pub const TIMESTAMP_SUBSEC_DIGITS: u16 = 6;
