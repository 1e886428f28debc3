use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::adapters::lists_sea::ListCreate;
use crate::error::AppError;
use crate::extractors::{ListId, ValidatedJson};
use crate::infra::txn::with_txn;
use crate::repos::lists;
use crate::routes::validation::validate_name;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    pub name: String,
}

async fn list_lists(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let all = lists::list_all(app_state.db()).await?;
    Ok(HttpResponse::Ok().json(all))
}

async fn create_list(
    app_state: web::Data<AppState>,
    body: ValidatedJson<ListRequest>,
) -> Result<HttpResponse, AppError> {
    let name = validate_name(&body.name, "List")?;

    let list = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            lists::create(txn, ListCreate::new(name))
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    info!(list_id = list.id, "list.created");
    Ok(HttpResponse::Created().json(list))
}

async fn get_list(
    list_id: ListId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let list = lists::require(app_state.db(), list_id.0).await?;
    Ok(HttpResponse::Ok().json(list))
}

async fn update_list(
    list_id: ListId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ListRequest>,
) -> Result<HttpResponse, AppError> {
    let id = list_id.0;
    let name = validate_name(&body.name, "List")?;

    let list = with_txn(&app_state, move |txn| {
        Box::pin(async move { lists::update(txn, id, name).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(list))
}

async fn delete_list(
    list_id: ListId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = list_id.0;

    with_txn(&app_state, move |txn| {
        Box::pin(async move { lists::delete(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    info!(list_id = id, "list.deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_lists))
            .route(web::post().to(create_list)),
    )
    .service(
        web::resource("/{list_id}")
            .route(web::get().to(get_list))
            .route(web::put().to(update_list))
            .route(web::delete().to(delete_list)),
    );
}
