//! Typed ids taken from the route path.
//!
//! These only check shape (a positive integer). Whether the row exists is
//! decided by the repos, inside the handler's transaction.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use tracing::Span;

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;

/// Parse `param` as a positive id and record it on the request span.
fn parse_positive_id(
    req: &HttpRequest,
    param: &'static str,
    kind: ValidationKind,
    label: &str,
) -> Result<i32, AppError> {
    let raw = req.match_info().get(param).ok_or_else(|| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Missing {param} parameter"))
    })?;

    let id = raw.parse::<i32>().map_err(|_| {
        DomainError::validation(kind.clone(), format!("Invalid {label} id: {raw}"))
    })?;

    if id <= 0 {
        return Err(DomainError::validation(
            kind,
            format!("{label} id must be positive, got: {id}"),
        )
        .into());
    }

    Span::current().record(param, id);
    Ok(id)
}

/// `{list_id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListId(pub i32);

impl FromRequest for ListId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive_id(req, "list_id", ValidationKind::ListId, "List").map(ListId))
    }
}

/// `{list_id}/items/{item_id}` path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPath {
    pub list_id: i32,
    pub item_id: i32,
}

impl FromRequest for ItemPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = parse_positive_id(req, "list_id", ValidationKind::ListId, "List").and_then(
            |list_id| {
                parse_positive_id(req, "item_id", ValidationKind::ItemId, "Item")
                    .map(|item_id| ItemPath { list_id, item_id })
            },
        );
        ready(parsed)
    }
}
