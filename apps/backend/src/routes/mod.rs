use actix_web::web;

pub mod health;
pub mod realtime;
pub mod wizard_games;

/// Register every route on `cfg`.
///
/// `main.rs` and the integration tests share this; middleware is added by the
/// caller around the `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Scorekeeping and event streams: /api/wizard/games/**
    cfg.service(
        web::scope("/api/wizard/games")
            .configure(realtime::configure_routes)
            .configure(wizard_games::configure_routes),
    );
}
