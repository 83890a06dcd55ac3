//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope around each request; Problem Details
//! rendering, the JSON extractor and the DB error mapper read it back.

use std::future::Future;

use tokio::task_local;

/// Reported when no request scope is active (startup, seeding, spawned tasks).
pub const UNSCOPED: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or [`UNSCOPED`].
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| UNSCOPED.to_string())
}

/// Run `fut` with `trace_id` visible through [`trace_id`].
pub async fn scope<F: Future>(trace_id: String, fut: F) -> F::Output {
    TRACE_ID.scope(trace_id, fut).await
}
