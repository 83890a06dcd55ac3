//! `/api/v1/states` handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{StateId, Validate, ValidatedJson};
use crate::repos::states::{State, StatePatch};
use crate::services::states::{NewState, StateService};
use crate::state::app_state::AppState;

pub const NAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<State> for StateResponse {
    fn from(state: State) -> Self {
        Self {
            id: state.id,
            name: state.name,
            description: state.description,
            is_active: state.is_active,
            sort_order: state.sort_order,
            created_at: state.created_at,
            updated_at: state.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListParams {
    /// Resolve defaults and enforce `skip >= 0`, `1 <= limit <= 1000`.
    pub fn resolve(&self) -> Result<(u64, u64), AppError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if skip < 0 {
            return Err(AppError::invalid(
                ErrorCode::InvalidPagination,
                format!("skip must be >= 0, got {skip}"),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::invalid(
                ErrorCode::InvalidPagination,
                format!("limit must be between 1 and {MAX_LIMIT}, got {limit}"),
            ));
        }

        Ok((skip as u64, limit as u64))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateStateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateStateRequest {
    #[serde(default)]
    pub name: Option<String>,
    // None = not provided, Some(None) = explicit null (clear)
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

fn check_name(name: &str) -> Result<(), AppError> {
    let chars = name.chars().count();
    if chars == 0 || chars > NAME_MAX_CHARS {
        return Err(AppError::invalid(
            ErrorCode::InvalidStateName,
            format!("name must be between 1 and {NAME_MAX_CHARS} characters, got {chars}"),
        ));
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), AppError> {
    let chars = description.chars().count();
    if chars > DESCRIPTION_MAX_CHARS {
        return Err(AppError::invalid(
            ErrorCode::InvalidDescription,
            format!("description must be at most {DESCRIPTION_MAX_CHARS} characters, got {chars}"),
        ));
    }
    Ok(())
}

fn check_sort_order(sort_order: i32) -> Result<(), AppError> {
    if sort_order < 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidSortOrder,
            format!("sort_order must be >= 0, got {sort_order}"),
        ));
    }
    Ok(())
}

impl Validate for CreateStateRequest {
    fn validate(&self) -> Result<(), AppError> {
        check_name(&self.name)?;
        if let Some(description) = &self.description {
            check_description(description)?;
        }
        check_sort_order(self.sort_order)
    }
}

impl Validate for UpdateStateRequest {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(Some(description)) = &self.description {
            check_description(description)?;
        }
        if let Some(sort_order) = self.sort_order {
            check_sort_order(sort_order)?;
        }
        Ok(())
    }
}

impl From<CreateStateRequest> for NewState {
    fn from(req: CreateStateRequest) -> Self {
        NewState {
            name: req.name,
            description: req.description,
            is_active: req.is_active,
            sort_order: req.sort_order,
        }
    }
}

impl From<UpdateStateRequest> for StatePatch {
    fn from(req: UpdateStateRequest) -> Self {
        StatePatch {
            name: req.name,
            description: req.description,
            is_active: req.is_active,
            sort_order: req.sort_order,
        }
    }
}

fn to_responses(states: Vec<State>) -> Vec<StateResponse> {
    states.into_iter().map(StateResponse::from).collect()
}

/// GET /api/v1/states?skip&limit
async fn list_states(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let (skip, limit) = params.resolve()?;

    let states = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .list(txn, skip, limit)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(to_responses(states)))
}

/// GET /api/v1/states/active
async fn list_active_states(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let states = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            StateService::new()
                .list_active(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(to_responses(states)))
}

/// GET /api/v1/states/{state_id}
async fn get_state(
    req: HttpRequest,
    state_id: StateId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let StateId(id) = state_id;

    let state = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .get_by_id(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(StateResponse::from(state)))
}

/// GET /api/v1/states/by-name/{name}
async fn get_state_by_name(
    req: HttpRequest,
    name: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = name.into_inner();
    let lookup = name.clone();

    let state = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .get_by_name(txn, &lookup)
                .await
                .map_err(AppError::from)
        })
    })
    .await?
    .ok_or_else(|| {
        AppError::not_found(
            ErrorCode::StateNotFound,
            format!("State with name '{name}' not found"),
        )
    })?;

    Ok(HttpResponse::Ok().json(StateResponse::from(state)))
}

/// POST /api/v1/states
async fn create_state(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateStateRequest>,
) -> Result<HttpResponse, AppError> {
    let input = NewState::from(body.into_inner());

    let state = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .create(txn, input)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(StateResponse::from(state)))
}

/// PUT /api/v1/states/{state_id}
async fn update_state(
    req: HttpRequest,
    state_id: StateId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<UpdateStateRequest>,
) -> Result<HttpResponse, AppError> {
    let StateId(id) = state_id;
    let patch = StatePatch::from(body.into_inner());

    let state = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .update(txn, id, patch)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(StateResponse::from(state)))
}

/// DELETE /api/v1/states/{state_id}
async fn delete_state(
    req: HttpRequest,
    state_id: StateId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let StateId(id) = state_id;

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .delete(txn, id)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("State {id} deleted successfully"),
    }))
}

/// POST /api/v1/states/initialize
async fn initialize_states(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let created = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move {
            StateService::new()
                .seed_defaults(txn)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(to_responses(created)))
}

/// Malformed query strings become Problem Details instead of actix's plain-text 400.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
    })
}

/// Register the states routes. Fixed segments precede `{state_id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .service(
            web::resource("")
                .route(web::get().to(list_states))
                .route(web::post().to(create_state)),
        )
        .service(web::resource("/active").route(web::get().to(list_active_states)))
        .service(web::resource("/initialize").route(web::post().to(initialize_states)))
        .service(web::resource("/by-name/{name}").route(web::get().to(get_state_by_name)))
        .service(
            web::resource("/{state_id}")
                .route(web::get().to(get_state))
                .route(web::put().to(update_state))
                .route(web::delete().to(delete_state)),
        );
}
