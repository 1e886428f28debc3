// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(ValidationKind::Name, "name must not be empty");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidName);
    assert_eq!(app.status().as_u16(), 400);

    let other = DomainError::validation(ValidationKind::Other("x".into()), "bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_conflicts_to_409() {
    let fk = DomainError::conflict(ConflictKind::ForeignKey, "missing parent");
    let app: AppError = fk.into();
    assert_eq!(app.code().as_str(), "FK_VIOLATION");
    assert_eq!(app.status().as_u16(), 409);

    let unique = DomainError::conflict(ConflictKind::Unique, "duplicate");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_VIOLATION");
    assert_eq!(app.status().as_u16(), 409);

    // Test generic conflict fallback
    let other = DomainError::conflict(ConflictKind::Other("x".to_string()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found_to_404() {
    let app: AppError = DomainError::list_not_found(3).into();
    assert_eq!(app.code().as_str(), "LIST_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
    assert_eq!(app.detail(), "List 3 not found");

    let app: AppError = DomainError::item_not_found(1, 9).into();
    assert_eq!(app.code().as_str(), "ITEM_NOT_FOUND");
    assert_eq!(app.detail(), "Item 9 not found in list 1");
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let other = DomainError::infra(InfraErrorKind::Other("DbErr".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn constructor_helpers() {
    let not_found = DomainError::not_found(NotFoundKind::Item, "item missing");
    assert!(matches!(
        not_found,
        DomainError::NotFound(NotFoundKind::Item, _)
    ));
    assert!(not_found.is_not_found());

    let infra = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    assert!(matches!(
        infra,
        DomainError::Infra(InfraErrorKind::Timeout, _)
    ));
    assert!(!infra.is_not_found());
}
