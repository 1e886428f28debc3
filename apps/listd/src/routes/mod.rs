use actix_web::web;

pub mod health;
pub mod items;
pub mod lists;
pub mod validation;

/// Register every application route.
///
/// `main.rs` and the test app builder both call this, so handler tests see
/// exactly the production paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Lists and their items: /api/lists/**
    cfg.service(
        web::scope("/api/lists")
            .configure(lists::configure_routes)
            .configure(items::configure_routes),
    );
}
