//! SeaORM adapter for the lists table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::lists;

pub mod dto;

pub use dto::{ListCreate, ListUpdate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<lists::Model>, sea_orm::DbErr> {
    lists::Entity::find_by_id(id).one(conn).await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<lists::Model>, sea_orm::DbErr> {
    lists::Entity::find()
        .order_by_asc(lists::Column::Id)
        .all(conn)
        .await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<bool, sea_orm::DbErr> {
    let n = lists::Entity::find()
        .filter(lists::Column::Id.eq(id))
        .count(conn)
        .await?;
    Ok(n > 0)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    lists::Entity::find().count(conn).await
}

pub async fn create_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ListCreate,
) -> Result<lists::Model, sea_orm::DbErr> {
    let now = dto.at.unwrap_or_else(OffsetDateTime::now_utc);
    let active = lists::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

/// Returns `None` when no list has `dto.id`.
pub async fn update_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ListUpdate,
) -> Result<Option<lists::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, dto.id).await? else {
        return Ok(None);
    };

    let mut active: lists::ActiveModel = existing.into();
    active.name = Set(dto.name);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1). Items go with the list.
pub async fn delete_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = lists::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
