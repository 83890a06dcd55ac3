use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;

async fn post_state(body: Value) -> actix_web::dev::ServiceResponse {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;
    let req = test::TestRequest::post()
        .uri("/api/v1/states")
        .set_json(body)
        .to_request();
    test::call_service(&app, req).await
}

#[actix_web::test]
async fn empty_name_is_rejected() {
    let resp = post_state(json!({ "name": "" })).await;
    assert_problem(resp, "INVALID_STATE_NAME", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn name_length_is_counted_in_characters() {
    // 50 multi-byte characters fit.
    let resp = post_state(json!({ "name": "é".repeat(50) })).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = post_state(json!({ "name": "x".repeat(51) })).await;
    assert_problem(
        resp,
        "INVALID_STATE_NAME",
        StatusCode::BAD_REQUEST,
        Some("got 51"),
    )
    .await;
}

#[actix_web::test]
async fn long_description_is_rejected() {
    let resp = post_state(json!({ "name": "Described", "description": "d".repeat(201) })).await;
    assert_problem(resp, "INVALID_DESCRIPTION", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn negative_sort_order_is_rejected() {
    let resp = post_state(json!({ "name": "Negative", "sort_order": -1 })).await;
    assert_problem(resp, "INVALID_SORT_ORDER", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn missing_name_is_bad_request() {
    let resp = post_state(json!({ "sort_order": 1 })).await;
    assert_problem(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, Some("name")).await;
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/states")
        .insert_header(ContentType::json())
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn update_validates_supplied_fields() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::put()
        .uri("/api/v1/states/1")
        .set_json(json!({ "sort_order": -5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, "INVALID_SORT_ORDER", StatusCode::BAD_REQUEST, None).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/states/1")
        .set_json(json!({ "name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, "INVALID_STATE_NAME", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn bad_state_ids_are_rejected() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    for id in ["abc", "0", "-3"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/states/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, "INVALID_STATE_ID", StatusCode::BAD_REQUEST, None).await;
    }
}

#[actix_web::test]
async fn pagination_bounds_are_enforced() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    for query in ["skip=-1", "limit=0", "limit=1001"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/states?{query}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, "INVALID_PAGINATION", StatusCode::BAD_REQUEST, None).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/states?limit=1000")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn non_numeric_query_is_bad_request() {
    let state = build_test_state().await.expect("test state");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/states?limit=lots")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid query string"),
    )
    .await;
}
