/// HTTP request handlers
use crate::domain::Health;
use crate::errors::AppResult;
use crate::services::WeatherService;
use crate::templates::TemplateEngine;
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub templates: Arc<TemplateEngine>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Weather page; upstream failures are rendered in-page
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state.weather_service.page().await;
    let html = state.templates.render_page(&page)?;
    Ok(Html(html))
}
