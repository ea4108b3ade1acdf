use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use wizard_backend::config::AppConfig;
use wizard_backend::middleware::cors::cors_middleware;
use wizard_backend::middleware::request_trace::RequestTrace;
use wizard_backend::middleware::structured_logger::StructuredLogger;
use wizard_backend::routes;
use wizard_backend::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let host = config.host.clone();
    let port = config.port;
    info!(
        host = %host,
        port,
        heartbeat_secs = config.sse_heartbeat.as_secs(),
        channel_capacity = config.sse_channel_capacity,
        "Starting Wizard scorekeeper backend"
    );
    println!("🚀 Starting Wizard Backend on http://{}:{}", host, port);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
