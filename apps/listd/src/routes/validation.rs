//! Request field validation shared by the list and item handlers.
//!
//! Failures are `DomainError::Validation`; handlers turn them into 400
//! responses through `From<DomainError> for AppError`.

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_NAME_LEN: usize = 255;

/// Trim `raw` and check it is a usable list or item name.
pub fn validate_name(raw: &str, label: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::Name,
            format!("{label} name must not be empty"),
        ));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(DomainError::validation(
            ValidationKind::Name,
            format!("{label} name must be at most {MAX_NAME_LEN} characters, got {len}"),
        ));
    }
    Ok(name.to_string())
}

/// An update that would change nothing is rejected.
pub fn require_changes(has_changes: bool) -> Result<(), DomainError> {
    if has_changes {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::EmptyUpdate,
            "At least one of name or done must be provided",
        ))
    }
}
