use actix_web::web;

pub mod health;
pub mod states;

/// Register every application route.
///
/// Shared by `main.rs` and the integration tests so both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // States routes: /api/v1/states/**
    cfg.service(web::scope("/api/v1/states").configure(states::configure_routes));
}
