use actix_web::{web, App, HttpServer};
use listd::config::db::Config;
use listd::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use listd::state::app_state::AppState;
use listd::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing(telemetry::LogFormat::from_env());

    let host = std::env::var("LISTD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("LISTD_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("LISTD_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match AppState::connect(config).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, db_kind = %app_state.config().db_kind, "starting listd");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
