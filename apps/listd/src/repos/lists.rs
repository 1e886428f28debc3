//! List repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::lists_sea as lists_adapter;
use crate::entities::lists;
use crate::errors::domain::DomainError;

/// List domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub id: i32,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<lists::Model> for List {
    fn from(model: lists::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: lists_adapter::ListCreate,
) -> Result<List, DomainError> {
    let model = lists_adapter::create_list(conn, dto).await?;
    Ok(List::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
) -> Result<Option<List>, DomainError> {
    let model = lists_adapter::find_by_id(conn, list_id).await?;
    Ok(model.map(List::from))
}

/// Find list by ID or return `NotFound(List)`.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
) -> Result<List, DomainError> {
    find_by_id(conn, list_id)
        .await?
        .ok_or_else(|| DomainError::list_not_found(list_id))
}

/// All lists, ascending by id.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<List>, DomainError> {
    let models = lists_adapter::find_all(conn).await?;
    Ok(models.into_iter().map(List::from).collect())
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
) -> Result<bool, DomainError> {
    Ok(lists_adapter::exists(conn, list_id).await?)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(lists_adapter::count(conn).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    name: String,
) -> Result<List, DomainError> {
    let dto = lists_adapter::ListUpdate { id: list_id, name };
    lists_adapter::update_list(conn, dto)
        .await?
        .map(List::from)
        .ok_or_else(|| DomainError::list_not_found(list_id))
}

/// Delete a list and, through the foreign key, every item in it.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
) -> Result<(), DomainError> {
    match lists_adapter::delete_list(conn, list_id).await? {
        0 => Err(DomainError::list_not_found(list_id)),
        _ => Ok(()),
    }
}
