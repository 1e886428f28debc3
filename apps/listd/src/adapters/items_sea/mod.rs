//! SeaORM adapter for the items table.
//!
//! Lookups are scoped by list: an item id under the wrong list is treated
//! as absent.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::items;

pub mod dto;

pub use dto::{ItemCreate, ItemUpdate};

pub async fn find_in_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    id: i32,
) -> Result<Option<items::Model>, sea_orm::DbErr> {
    items::Entity::find()
        .filter(items::Column::ListId.eq(list_id))
        .filter(items::Column::Id.eq(id))
        .one(conn)
        .await
}

pub async fn find_by_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
) -> Result<Vec<items::Model>, sea_orm::DbErr> {
    items::Entity::find()
        .filter(items::Column::ListId.eq(list_id))
        .order_by_asc(items::Column::Id)
        .all(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<items::Model>, sea_orm::DbErr> {
    items::Entity::find()
        .order_by_asc(items::Column::Id)
        .all(conn)
        .await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    id: i32,
) -> Result<bool, sea_orm::DbErr> {
    let n = items::Entity::find()
        .filter(items::Column::ListId.eq(list_id))
        .filter(items::Column::Id.eq(id))
        .count(conn)
        .await?;
    Ok(n > 0)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    items::Entity::find().count(conn).await
}

pub async fn create_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ItemCreate,
) -> Result<items::Model, sea_orm::DbErr> {
    let now = dto.at.unwrap_or_else(OffsetDateTime::now_utc);
    let active = items::ActiveModel {
        id: NotSet,
        list_id: Set(dto.list_id),
        name: Set(dto.name),
        done: Set(dto.done),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

/// Returns `None` when the item does not exist in `dto.list_id`.
pub async fn update_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ItemUpdate,
) -> Result<Option<items::Model>, sea_orm::DbErr> {
    let Some(existing) = find_in_list(conn, dto.list_id, dto.id).await? else {
        return Ok(None);
    };

    let mut active: items::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        active.name = Set(name);
    }
    if let Some(done) = dto.done {
        active.done = Set(done);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_item<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    list_id: i32,
    id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = items::Entity::delete_many()
        .filter(items::Column::ListId.eq(list_id))
        .filter(items::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
