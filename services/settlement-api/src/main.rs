use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use prometheus::Registry;
use settlement::SettlementEngine;
use settlement_api::{config::Config, handlers, metrics};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .json()
        .init();

    info!("Starting Settlement API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().map_err(anyhow::Error::msg)?;

    info!("Configuration loaded successfully");

    let engine = web::Data::new(
        SettlementEngine::new(config.settlement.clone()).context("Invalid settlement configuration")?,
    );

    let registry = Registry::new();
    metrics::register_metrics(&registry).context("Failed to register metrics")?;
    let registry = web::Data::new(registry);

    let server_config = config.server.clone();
    info!(
        "Starting HTTP server on {}:{}",
        server_config.host, server_config.port
    );
    info!("Settlement endpoint: POST /settle");

    HttpServer::new(move || {
        App::new()
            .app_data(engine.clone())
            .app_data(registry.clone())
            .app_data(handlers::json_config(server_config.json_limit_bytes))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::not_found))
    })
    .workers(config.server.workers)
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await?;

    info!("Settlement API stopped");
    Ok(())
}
