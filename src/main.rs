/// Tokyo weather page: current conditions, UV, air quality and forecast
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod templates;
mod utils;

use crate::clients::OpenWeatherClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::WeatherService;
use crate::templates::TemplateEngine;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(
        city = %config.location.city,
        lat = config.location.lat,
        lon = config.location.lon,
        "Configuration loaded successfully"
    );
    if !config.has_api_key() {
        warn!("OPENWEATHER_API_KEY is not set; the index page will show a configuration error");
    }

    let client = OpenWeatherClient::new(&config)?;
    info!("Weather provider at {}", client.base_url());
    let templates = TemplateEngine::new()?;
    let port = config.port;

    let state = AppState {
        weather_service: Arc::new(WeatherService::new(config, client)),
        templates: Arc::new(templates),
    };

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("tokyo_weather listening on {}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
