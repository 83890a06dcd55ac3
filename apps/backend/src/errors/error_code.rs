//! Error codes for the states API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the states API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Invalid state id in the path
    InvalidStateId,
    /// State name missing, empty or too long
    InvalidStateName,
    /// Description too long
    InvalidDescription,
    /// Negative sort order
    InvalidSortOrder,
    /// skip/limit outside the accepted range
    InvalidPagination,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// State not found
    StateNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Another state already uses this name
    DuplicateStateName,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation on an unmapped column
    UniqueViolation,
    /// Check constraint violation
    CheckViolation,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidStateId => "INVALID_STATE_ID",
            Self::InvalidStateName => "INVALID_STATE_NAME",
            Self::InvalidDescription => "INVALID_DESCRIPTION",
            Self::InvalidSortOrder => "INVALID_SORT_ORDER",
            Self::InvalidPagination => "INVALID_PAGINATION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::StateNotFound => "STATE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateStateName => "DUPLICATE_STATE_NAME",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::InvalidStateId,
        Self::InvalidStateName,
        Self::InvalidDescription,
        Self::InvalidSortOrder,
        Self::InvalidPagination,
        Self::ValidationError,
        Self::BadRequest,
        Self::StateNotFound,
        Self::NotFound,
        Self::DuplicateStateName,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::UniqueViolation,
        Self::CheckViolation,
        Self::Internal,
        Self::ConfigError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
