use std::process;

use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{web, App, HttpServer};
use backend::config::db::{DbKind, RuntimeEnv};
use backend::config::server::ServerConfig;
use backend::db::txn::with_txn;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::services::states::StateService;
use backend::AppError;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            process::exit(1);
        }
    };

    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid STATES_DB_KIND");
            process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, db_kind = ?db_kind, "starting states backend");

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            process::exit(1);
        }
    };

    if config.seed_on_startup {
        let seeded = with_txn(None, &app_state, |txn| {
            Box::pin(async move {
                StateService::new()
                    .seed_defaults(txn)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await;
        match seeded {
            Ok(created) => info!(created = created.len(), "startup seeding finished"),
            Err(e) => {
                error!(error = %e, "startup seeding failed");
                process::exit(1);
            }
        }
    }

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
