use actix_web::http::StatusCode;
use actix_web::test;
use listd::repos::{items, lists};
use listd::test_support::TestContext;
use listd_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use super::TestFn;
use crate::common::{call_json, call_ok};

pub fn tests() -> Vec<(&'static str, TestFn)> {
    vec![
        case!("lists_get_all_returns_fixture_in_id_order", get_all_returns_fixture_in_id_order),
        case!("lists_create_then_read_back", create_then_read_back),
        case!("lists_create_rejects_blank_name", create_rejects_blank_name),
        case!("lists_create_rejects_malformed_json", create_rejects_malformed_json),
        case!("lists_get_missing_is_404", get_missing_is_404),
        case!("lists_non_positive_id_is_400", non_positive_id_is_400),
        case!("lists_update_renames_and_bumps_updated_at", update_renames_and_bumps_updated_at),
        case!("lists_update_missing_is_404", update_missing_is_404),
        case!("lists_delete_cascades_to_items", delete_cascades_to_items),
        case!("lists_delete_missing_is_404", delete_missing_is_404),
        // These two run back to back: the second must not see the first's writes.
        case!("lists_isolation_wipe_everything", isolation_wipe_everything),
        case!("lists_isolation_sees_pristine_fixture", isolation_sees_pristine_fixture),
    ]
}

async fn get_all_returns_fixture_in_id_order(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::get().uri("/api/lists").to_request();
    let body: Vec<Value> = call_ok(&app, req, StatusCode::OK).await;

    let names: Vec<&str> = body.iter().map(|l| l["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Groceries", "Chores"]);

    let ids: Vec<i64> = body.iter().map(|l| l["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2]);

    for list in &body {
        assert_eq!(list["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(list["updated_at"], "2024-01-01T00:00:00Z");
    }
}

async fn create_then_read_back(ctx: TestContext) {
    let app = ctx.app().build().await;

    let req = test::TestRequest::post()
        .uri("/api/lists")
        .set_json(json!({ "name": "  Hardware store  " }))
        .to_request();
    let created: Value = call_ok(&app, req, StatusCode::CREATED).await;
    assert_eq!(created["name"], "Hardware store");
    let id = created["id"].as_i64().expect("id");
    assert!(id > 2, "new list must not reuse a fixture id, got {id}");

    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{id}"))
        .to_request();
    let fetched: Value = call_ok(&app, req, StatusCode::OK).await;
    assert_eq!(fetched, created);

    assert_eq!(lists::count(ctx.state.db()).await.unwrap(), 3);
}

async fn create_rejects_blank_name(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::post()
        .uri("/api/lists")
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_NAME",
        StatusCode::BAD_REQUEST,
        Some("must not be empty"),
    )
    .await;

    assert_eq!(lists::count(ctx.state.db()).await.unwrap(), 2);
}

async fn create_rejects_malformed_json(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::post()
        .uri("/api/lists")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("unexpected end of input"),
    )
    .await;
}

async fn get_missing_is_404(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::get().uri("/api/lists/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "LIST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("List 999 not found"),
    )
    .await;
}

async fn non_positive_id_is_400(ctx: TestContext) {
    let app = ctx.app().build().await;
    for (uri, detail) in [
        ("/api/lists/0", "must be positive"),
        ("/api/lists/-4", "must be positive"),
        ("/api/lists/abc", "Invalid List id"),
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_LIST_ID",
            StatusCode::BAD_REQUEST,
            Some(detail),
        )
        .await;
    }
}

async fn update_renames_and_bumps_updated_at(ctx: TestContext) {
    let chores = ctx.fixture.list("Chores").expect("fixture list").clone();
    let app = ctx.app().build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/lists/{}", chores.id))
        .set_json(json!({ "name": "Housework" }))
        .to_request();
    let updated: Value = call_ok(&app, req, StatusCode::OK).await;
    assert_eq!(updated["id"], chores.id);
    assert_eq!(updated["name"], "Housework");
    assert_eq!(updated["created_at"], "2024-01-01T00:00:00Z");
    assert_ne!(updated["updated_at"], "2024-01-01T00:00:00Z");

    let stored = lists::require(ctx.state.db(), chores.id).await.unwrap();
    assert_eq!(stored.name, "Housework");
    assert!(stored.updated_at > chores.updated_at);
}

async fn update_missing_is_404(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::put()
        .uri("/api/lists/42")
        .set_json(json!({ "name": "Nowhere" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "LIST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
}

async fn delete_cascades_to_items(ctx: TestContext) {
    let groceries = ctx.fixture.list("Groceries").expect("fixture list").clone();
    let chores = ctx.fixture.list("Chores").expect("fixture list").clone();
    let app = ctx.app().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/lists/{}", groceries.id))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/api/lists/{}", groceries.id))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let db = ctx.state.db();
    let remaining = items::list_all(db).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|i| i.list_id == chores.id));
    assert!(lists::exists(db, chores.id).await.unwrap());
}

async fn delete_missing_is_404(ctx: TestContext) {
    let app = ctx.app().build().await;
    let req = test::TestRequest::delete().uri("/api/lists/77").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "LIST_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
    assert_eq!(lists::count(ctx.state.db()).await.unwrap(), 2);
}

async fn isolation_wipe_everything(ctx: TestContext) {
    let app = ctx.app().build().await;
    for list in &ctx.fixture.lists {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/lists/{}", list.id))
            .to_request();
        let (status, _) = call_json(&app, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let req = test::TestRequest::post()
        .uri("/api/lists")
        .set_json(json!({ "name": "Leftover" }))
        .to_request();
    let (status, _) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(lists::count(ctx.state.db()).await.unwrap(), 1);
    assert_eq!(items::count(ctx.state.db()).await.unwrap(), 0);
}

async fn isolation_sees_pristine_fixture(ctx: TestContext) {
    let db = ctx.state.db();
    let all_lists = lists::list_all(db).await.unwrap();
    let all_items = items::list_all(db).await.unwrap();

    assert_eq!(all_lists, ctx.fixture.lists);
    assert_eq!(all_items, ctx.fixture.items);
    assert!(all_lists.iter().all(|l| l.name != "Leftover"));
}
