/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Shown when the service starts without an OpenWeather credential
pub const MISSING_API_KEY_MESSAGE: &str =
    "OpenWeatherのAPIキーが設定されていません。.env に OPENWEATHER_API_KEY= を追加してください。";

const FETCH_FAILED_PREFIX: &str = "天気情報の取得に失敗しました";

/// Failure of a single call to the weather provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{endpoint} returned an unexpected body: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            UpstreamError::Transport { endpoint, .. }
            | UpstreamError::Status { endpoint, .. }
            | UpstreamError::Decode { endpoint, .. } => *endpoint,
        }
    }
}

/// A date string that is not `YYYY-MM-DD`
#[derive(Debug, Error)]
#[error("invalid calendar date {input:?}: {source}")]
pub struct FormatError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(&'static str),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl AppError {
    /// Message embedded into the page in place of the weather sections
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(msg) => (*msg).to_string(),
            other => format!("{}: {}", FETCH_FAILED_PREFIX, other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self);

        let body = format!(
            "<!DOCTYPE html><html><body><p>{}</p></body></html>",
            tera::escape_html(&self.user_message())
        );

        // Failures are rendered in-page; the status stays 200.
        (StatusCode::OK, Html(body)).into_response()
    }
}

/// Type alias for application results
pub type AppResult<T> = Result<T, AppError>;
