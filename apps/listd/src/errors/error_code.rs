//! Error codes for the listd API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Name missing, blank or too long
    InvalidName,
    /// Malformed list id in the path
    InvalidListId,
    /// Malformed item id in the path
    InvalidItemId,
    /// Update request carried no fields
    EmptyUpdate,
    /// General validation error
    ValidationError,
    /// Body could not be decoded
    BadRequest,

    // Resource Not Found
    ListNotFound,
    ItemNotFound,
    NotFound,

    // Database Constraint Violations
    /// Foreign key constraint violation (SQLSTATE 23503)
    FkViolation,
    /// Unique constraint violation (SQLSTATE 23505)
    UniqueViolation,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidListId => "INVALID_LIST_ID",
            Self::InvalidItemId => "INVALID_ITEM_ID",
            Self::EmptyUpdate => "EMPTY_UPDATE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::ListNotFound => "LIST_NOT_FOUND",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::FkViolation => "FK_VIOLATION",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::InvalidName,
        Self::InvalidListId,
        Self::InvalidItemId,
        Self::EmptyUpdate,
        Self::ValidationError,
        Self::BadRequest,
        Self::ListNotFound,
        Self::ItemNotFound,
        Self::NotFound,
        Self::FkViolation,
        Self::UniqueViolation,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
