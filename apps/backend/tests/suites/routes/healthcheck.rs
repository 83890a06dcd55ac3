use actix_web::http::StatusCode;
use actix_web::test;
use backend::state::app_state::AppState;
use serde_json::Value;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;

#[actix_web::test]
async fn root_describes_the_service() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_json(resp).await;
    assert_eq!(body["service"], "states-api");
    assert_eq!(body["status"], "running");
    assert_eq!(body["api"], "/api/v1/states");
    assert!(body["version"].is_string());
    Ok(())
}

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_eq!(body["migrations"], "m20240101_000001_create_states");
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
    Ok(())
}

#[actix_web::test]
async fn health_stays_200_without_database() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
    assert_eq!(body["migrations"], "unknown");
}
