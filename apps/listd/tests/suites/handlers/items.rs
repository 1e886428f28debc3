use actix_web::http::StatusCode;
use actix_web::test;
use listd::repos::items;
use listd::test_support::TestContext;
use listd_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use super::TestFn;
use crate::common::{call_json, call_ok};

pub fn tests() -> Vec<(&'static str, TestFn)> {
    vec![
        case!("items_list_returns_only_that_lists_items", list_returns_only_that_lists_items),
        case!("items_list_of_missing_list_is_404", list_of_missing_list_is_404),
        case!("items_create_then_read_back", create_then_read_back),
        case!("items_create_in_missing_list_inserts_nothing", create_in_missing_list_inserts_nothing),
        case!("items_create_rejects_wrong_field_types", create_rejects_wrong_field_types),
        case!("items_update_done_keeps_name", update_done_keeps_name),
        case!("items_update_requires_a_field", update_requires_a_field),
        case!("items_update_rejects_blank_name", update_rejects_blank_name),
        case!("items_item_of_other_list_is_404", item_of_other_list_is_404),
        case!("items_delete_then_gone", delete_then_gone),
        case!("items_non_positive_item_id_is_400", non_positive_item_id_is_400),
    ]
}

async fn list_returns_only_that_lists_items(ctx: TestContext) {
    let groceries = ctx.fixture.list("Groceries").expect("fixture list").id;
    let app = ctx.app().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{groceries}/items"))
        .to_request();
    let body: Vec<Value> = call_ok(&app, req, StatusCode::OK).await;

    let rows: Vec<(&str, bool)> = body
        .iter()
        .map(|i| (i["name"].as_str().unwrap(), i["done"].as_bool().unwrap()))
        .collect();
    assert_eq!(rows, [("Milk", false), ("Eggs", true)]);
    assert!(body.iter().all(|i| i["list_id"] == groceries));
}

async fn list_of_missing_list_is_404(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::get().uri("/api/lists/31/items").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "LIST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("List 31 not found"),
    )
    .await;
}

async fn create_then_read_back(ctx: TestContext) {
    let chores = ctx.fixture.list("Chores").expect("fixture list").id;
    let app = ctx.app().build().await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/lists/{chores}/items"))
        .set_json(json!({ "name": "Vacuum" }))
        .to_request();
    let created: Value = call_ok(&app, req, StatusCode::CREATED).await;
    assert_eq!(created["name"], "Vacuum");
    assert_eq!(created["list_id"], chores);
    assert_eq!(created["done"], false);

    let id = created["id"].as_i64().expect("id");
    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{chores}/items/{id}"))
        .to_request();
    let fetched: Value = call_ok(&app, req, StatusCode::OK).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{chores}/items"))
        .to_request();
    let listed: Vec<Value> = call_ok(&app, req, StatusCode::OK).await;
    assert_eq!(listed.len(), 3);
    assert_eq!(listed.last(), Some(&created));
}

async fn create_in_missing_list_inserts_nothing(ctx: TestContext) {
    let db = ctx.state.db();
    let before = items::count(db).await.unwrap();
    let app = ctx.app().build().await;

    let req = test::TestRequest::post()
        .uri("/api/lists/404/items")
        .set_json(json!({ "name": "Orphan", "done": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "LIST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("List 404 not found"),
    )
    .await;

    assert_eq!(items::count(db).await.unwrap(), before);
}

async fn create_rejects_wrong_field_types(ctx: TestContext) {
    let groceries = ctx.fixture.list("Groceries").expect("fixture list").id;
    let app = ctx.app().build().await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/lists/{groceries}/items"))
        .set_json(json!({ "name": "Butter", "done": "yes" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("wrong types"),
    )
    .await;

    assert_eq!(items::count(ctx.state.db()).await.unwrap(), 4);
}

async fn update_done_keeps_name(ctx: TestContext) {
    let milk = ctx.fixture.item("Milk").expect("fixture item").clone();
    let app = ctx.app().build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/lists/{}/items/{}", milk.list_id, milk.id))
        .set_json(json!({ "done": true }))
        .to_request();
    let updated: Value = call_ok(&app, req, StatusCode::OK).await;
    assert_eq!(updated["name"], "Milk");
    assert_eq!(updated["done"], true);

    let stored = items::require(ctx.state.db(), milk.list_id, milk.id)
        .await
        .unwrap();
    assert!(stored.done);
    assert!(stored.updated_at > milk.updated_at);
    assert_eq!(stored.created_at, milk.created_at);
}

async fn update_requires_a_field(ctx: TestContext) {
    let eggs = ctx.fixture.item("Eggs").expect("fixture item").clone();
    let app = ctx.app().build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/lists/{}/items/{}", eggs.list_id, eggs.id))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "EMPTY_UPDATE",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

async fn update_rejects_blank_name(ctx: TestContext) {
    let eggs = ctx.fixture.item("Eggs").expect("fixture item").clone();
    let app = ctx.app().build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/lists/{}/items/{}", eggs.list_id, eggs.id))
        .set_json(json!({ "name": "", "done": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_NAME",
        StatusCode::BAD_REQUEST,
        Some("Item name"),
    )
    .await;

    let stored = items::require(ctx.state.db(), eggs.list_id, eggs.id)
        .await
        .unwrap();
    assert_eq!(stored, eggs);
}

async fn item_of_other_list_is_404(ctx: TestContext) {
    let chores = ctx.fixture.list("Chores").expect("fixture list").id;
    let milk = ctx.fixture.item("Milk").expect("fixture item").id;
    let app = ctx.app().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{chores}/items/{milk}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ITEM_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some(&format!("Item {milk} not found in list {chores}")),
    )
    .await;
}

async fn delete_then_gone(ctx: TestContext) {
    let laundry = ctx.fixture.item("Laundry").expect("fixture item").clone();
    let uri = format!("/api/lists/{}/items/{}", laundry.list_id, laundry.id);
    let app = ctx.app().build().await;

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "ITEM_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    assert_eq!(items::count(ctx.state.db()).await.unwrap(), 3);
}

async fn non_positive_item_id_is_400(ctx: TestContext) {
    let groceries = ctx.fixture.list("Groceries").expect("fixture list").id;
    let app = ctx.app().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{groceries}/items/0"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_ITEM_ID",
        StatusCode::BAD_REQUEST,
        Some("Item id must be positive"),
    )
    .await;
}
