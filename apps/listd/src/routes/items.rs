use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::adapters::items_sea::ItemCreate;
use crate::error::AppError;
use crate::extractors::{ItemPath, ListId, ValidatedJson};
use crate::infra::txn::with_txn;
use crate::repos::items::{self, ItemChanges};
use crate::routes::validation::{require_changes, validate_name};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

async fn list_items(
    list_id: ListId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let all = items::list_for_list(app_state.db(), list_id.0).await?;
    Ok(HttpResponse::Ok().json(all))
}

async fn create_item(
    list_id: ListId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let list_id = list_id.0;
    let payload = body.into_inner();
    let name = validate_name(&payload.name, "Item")?;
    let dto = ItemCreate::new(list_id, name).done(payload.done);

    let item = with_txn(&app_state, move |txn| {
        Box::pin(async move { items::create(txn, dto).await.map_err(AppError::from) })
    })
    .await?;

    info!(list_id, item_id = item.id, "item.created");
    Ok(HttpResponse::Created().json(item))
}

async fn get_item(
    path: ItemPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let item = items::require(app_state.db(), path.list_id, path.item_id).await?;
    Ok(HttpResponse::Ok().json(item))
}

async fn update_item(
    path: ItemPath,
    app_state: web::Data<AppState>,
    body: ValidatedJson<UpdateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let ItemPath { list_id, item_id } = path;
    let payload = body.into_inner();

    let changes = ItemChanges {
        name: payload
            .name
            .as_deref()
            .map(|raw| validate_name(raw, "Item"))
            .transpose()?,
        done: payload.done,
    };
    require_changes(!changes.is_empty())?;

    let item = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            items::update(txn, list_id, item_id, changes)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(item))
}

async fn delete_item(
    path: ItemPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ItemPath { list_id, item_id } = path;

    with_txn(&app_state, move |txn| {
        Box::pin(async move {
            items::delete(txn, list_id, item_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    info!(list_id, item_id, "item.deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{list_id}/items")
            .route(web::get().to(list_items))
            .route(web::post().to(create_item)),
    )
    .service(
        web::resource("/{list_id}/items/{item_id}")
            .route(web::get().to(get_item))
            .route(web::put().to(update_item))
            .route(web::delete().to(delete_item)),
    );
}
