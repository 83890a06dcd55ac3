use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive state id taken from the `{state_id}` path segment.
///
/// Existence is not checked here; handlers surface `STATE_NOT_FOUND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateId(pub i64);

impl StateId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let state_id = raw.parse::<i64>().map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidStateId, format!("Invalid state id: {raw}"))
        })?;

        if state_id <= 0 {
            return Err(AppError::bad_request(
                ErrorCode::InvalidStateId,
                format!("State id must be positive, got: {state_id}"),
            ));
        }

        Ok(StateId(state_id))
    }
}

impl FromRequest for StateId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("state_id") {
            Some(raw) => StateId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidStateId,
                "Missing state_id parameter",
            )),
        })
    }
}
