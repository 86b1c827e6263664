//! User domain entity and related types.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{EMAIL_REQUIRED, NAME_REQUIRED, TIMESTAMP_SUBSEC_DIGITS};
use crate::error::{DomainError, DomainResult};

/// Current time at the precision the relational store can hold.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(TIMESTAMP_SUBSEC_DIGITS)
}

/// User domain entity
///
/// Fields are public for the persistence mappers; application code should
/// go through [`User::new`], [`User::update_name`] and [`User::update_email`]
/// so that name and email are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier.
    ///
    /// Both timestamps are taken from the same instant.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.is_empty() {
            return Err(DomainError::validation(NAME_REQUIRED));
        }
        if email.is_empty() {
            return Err(DomainError::validation(EMAIL_REQUIRED));
        }

        let now = now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update user's name
    pub fn update_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation(NAME_REQUIRED));
        }
        self.name = name;
        self.updated_at = now();
        Ok(())
    }

    /// Update user's email
    pub fn update_email(&mut self, email: impl Into<String>) -> DomainResult<()> {
        let email = email.into();
        if email.is_empty() {
            return Err(DomainError::validation(EMAIL_REQUIRED));
        }
        self.email = email;
        self.updated_at = now();
        Ok(())
    }
}

/// Render a timestamp as RFC 3339 with second precision and explicit offset.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = "550e8400-e29b-41d4-a716-446655440000"))]
    pub id: String,
    /// User display name
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: String,
    /// User email address
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: String,
    /// Account creation timestamp
    #[cfg_attr(feature = "openapi", schema(example = "2024-07-08T10:30:00Z"))]
    pub created_at: String,
    /// Last modification timestamp
    #[cfg_attr(feature = "openapi", schema(example = "2024-07-08T11:45:00Z"))]
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
        }
    }
}
