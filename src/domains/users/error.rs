//! Store-specific error types.

use thiserror::Error;

/// Errors that can occur while reading or writing user records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert would duplicate an existing email address.
    #[error("Email {email} already exists")]
    UniqueViolation { email: String },

    /// A stored row could not be decoded into a `User`.
    #[error("Corrupt user row: {0}")]
    Corrupt(String),

    /// The underlying database reported an error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a new unique-violation error for the given email.
    pub fn unique_violation(email: impl Into<String>) -> Self {
        Self::UniqueViolation {
            email: email.into(),
        }
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}
