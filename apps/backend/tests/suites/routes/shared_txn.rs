//! A handler that runs on a test-owned transaction: nothing it writes
//! survives the rollback.

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpRequest, HttpResponse};
use backend::db::txn::{with_txn, SharedTxn};
use backend::services::states::{NewState, StateService};
use backend::state::app_state::AppState;
use backend::AppError;
use backend_test_support::unique_helpers::unique_state_name;

use crate::support::app_builder::create_test_app;
use crate::support::build_test_state;
use crate::support::shared_txn;

async fn create_in_shared_txn(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    shared: web::Data<SharedTxn>,
    name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    shared_txn::inject(&req, &shared);
    let input = NewState::new(name.into_inner());

    let state = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .create(txn, input)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().body(state.id.to_string()))
}

#[actix_web::test]
async fn shared_txn_writes_are_rolled_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database").clone();
    let name = unique_state_name("shared");

    let shared = shared_txn::open(&db).await?;
    let app = create_test_app(state.clone())
        .with_routes({
            let shared = shared.clone();
            move |cfg| {
                cfg.app_data(web::Data::new(shared.clone()))
                    .route("/probe/{name}", web::post().to(create_in_shared_txn));
            }
        })
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri(&format!("/probe/{name}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Visible inside the shared transaction.
    let inside = StateService::new()
        .get_by_name(shared.transaction(), &name)
        .await?;
    assert!(inside.is_some());

    drop(resp);
    drop(app);
    shared_txn::rollback(shared).await?;

    let after = StateService::new().get_by_name(&db, &name).await?;
    assert_eq!(after, None);
    Ok(())
}
