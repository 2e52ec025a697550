use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use sharia_deals::config::{LoggingSettings, Settings};
use sharia_deals::core::Matcher;
use sharia_deals::models::Assumptions;
use sharia_deals::routes::{self, AppState};
use sharia_deals::services::{Catalog, RecommendationService};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Sharia Deals service...");

    let catalog = match settings.catalog.path.as_deref() {
        Some(path) => match Catalog::load(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to load catalog from {}: {}", path, e);
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
            }
        },
        None => {
            warn!("No catalog path configured, starting with an empty catalog");
            Catalog::new()
        }
    };

    let matcher = Matcher::new(settings.matching.oversample_factor);
    let default_assumptions = Assumptions::from(&settings.assumptions);

    info!("Matcher initialized: {:?}", matcher);
    info!("Default assumptions: {:?}", default_assumptions);

    let app_state = AppState {
        recommendations: RecommendationService::new(Arc::new(catalog), matcher),
        default_assumptions,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(routes::handle_path_error))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
