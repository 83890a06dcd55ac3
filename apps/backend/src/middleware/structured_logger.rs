//! Access log: one `request_completed` event per request.
//!
//! Requests are keyed by their registered route pattern
//! (`/api/v1/states/{state_id}`), not the raw path, so every state id lands
//! under the same route in the logs.

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, StatusCode};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::trace_ctx;

/// Route label for requests that matched no registered resource.
const UNMATCHED_ROUTE: &str = "<unmatched>";

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Log level of an access-log line, by status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessLevel {
    Info,
    Warn,
    Error,
}

impl AccessLevel {
    fn for_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            AccessLevel::Error
        } else if status.is_client_error() {
            AccessLevel::Warn
        } else {
            AccessLevel::Info
        }
    }
}

struct Completion {
    method: Method,
    route: String,
    trace_id: String,
    status: StatusCode,
    elapsed: Duration,
}

impl Completion {
    fn emit(&self) {
        let status = self.status.as_u16();
        let duration_ms = self.elapsed.as_secs_f64() * 1000.0;
        let method = &self.method;
        let route = &self.route;
        let trace_id = &self.trace_id;

        match AccessLevel::for_status(self.status) {
            AccessLevel::Error => error!(
                http.method = %method, http.route = %route, http.status_code = status,
                duration_ms, trace_id = %trace_id, "request_completed"
            ),
            AccessLevel::Warn => warn!(
                http.method = %method, http.route = %route, http.status_code = status,
                duration_ms, trace_id = %trace_id, "request_completed"
            ),
            AccessLevel::Info => info!(
                http.method = %method, http.route = %route, http.status_code = status,
                duration_ms, trace_id = %trace_id, "request_completed"
            ),
        }
    }
}

fn route_of(req: &ServiceRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let route = route_of(&req);
        // RequestTrace wraps this middleware, so the id is already stored.
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| trace_ctx::UNSCOPED.to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            Completion {
                method,
                route,
                trace_id,
                status,
                elapsed: start.elapsed(),
            }
            .emit();

            result
        })
    }
}
