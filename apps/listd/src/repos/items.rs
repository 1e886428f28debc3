//! Item repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::items_sea as items_adapter;
use crate::adapters::lists_sea as lists_adapter;
use crate::entities::items;
use crate::errors::domain::DomainError;

/// Item domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: i32,
    pub list_id: i32,
    pub name: String,
    pub done: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<items::Model> for Item {
    fn from(model: items::Model) -> Self {
        Self {
            id: model.id,
            list_id: model.list_id,
            name: model.name,
            done: model.done,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields an item update may change
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub done: Option<bool>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.done.is_none()
    }
}

/// Create an item. Fails with `NotFound(List)` when the parent list is
/// missing; nothing is inserted in that case.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: items_adapter::ItemCreate,
) -> Result<Item, DomainError> {
    if !lists_adapter::exists(conn, dto.list_id).await? {
        return Err(DomainError::list_not_found(dto.list_id));
    }
    let model = items_adapter::create_item(conn, dto).await?;
    Ok(Item::from(model))
}

pub async fn find_in_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    item_id: i32,
) -> Result<Option<Item>, DomainError> {
    let model = items_adapter::find_in_list(conn, list_id, item_id).await?;
    Ok(model.map(Item::from))
}

/// Find an item of a list or return `NotFound(Item)`.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    item_id: i32,
) -> Result<Item, DomainError> {
    find_in_list(conn, list_id, item_id)
        .await?
        .ok_or_else(|| DomainError::item_not_found(list_id, item_id))
}

/// Items of one list, ascending by id. The list itself must exist.
pub async fn list_for_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
) -> Result<Vec<Item>, DomainError> {
    if !lists_adapter::exists(conn, list_id).await? {
        return Err(DomainError::list_not_found(list_id));
    }
    let models = items_adapter::find_by_list(conn, list_id).await?;
    Ok(models.into_iter().map(Item::from).collect())
}

/// Every item across all lists, ascending by id.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Item>, DomainError> {
    let models = items_adapter::find_all(conn).await?;
    Ok(models.into_iter().map(Item::from).collect())
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    item_id: i32,
) -> Result<bool, DomainError> {
    Ok(items_adapter::exists(conn, list_id, item_id).await?)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(items_adapter::count(conn).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    item_id: i32,
    changes: ItemChanges,
) -> Result<Item, DomainError> {
    let dto = items_adapter::ItemUpdate {
        list_id,
        id: item_id,
        name: changes.name,
        done: changes.done,
    };
    items_adapter::update_item(conn, dto)
        .await?
        .map(Item::from)
        .ok_or_else(|| DomainError::item_not_found(list_id, item_id))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    item_id: i32,
) -> Result<(), DomainError> {
    match items_adapter::delete_item(conn, list_id, item_id).await? {
        0 => Err(DomainError::item_not_found(list_id, item_id)),
        _ => Ok(()),
    }
}
