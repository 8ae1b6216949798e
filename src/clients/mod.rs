/// External API clients module
pub mod models;

use crate::config::{AppConfig, Location};
use crate::errors::UpstreamError;
use models::{
    OwAirResponse, OwCurrentResponse, OwForecastResponse, OwOneCallResponse, OwUvResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("tokyo-weather/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// OpenWeatherMap client bound to one location and credential
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    lang: String,
    location: Location,
}

impl OpenWeatherClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: HttpClient::new(Duration::from_secs(config.upstream.timeout_secs))?,
            base_url: config.upstream.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            lang: config.upstream.lang.clone(),
            location: config.location.clone(),
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch current conditions
    pub async fn fetch_current(&self) -> Result<OwCurrentResponse, UpstreamError> {
        self.get_json("current weather", "/data/2.5/weather", &self.localized(&[]))
            .await
    }

    /// Fetch the UV index
    pub async fn fetch_uv_index(&self) -> Result<OwUvResponse, UpstreamError> {
        self.get_json("uv index", "/data/2.5/uvi", &self.base_params())
            .await
    }

    /// Fetch air pollution readings
    pub async fn fetch_air_pollution(&self) -> Result<OwAirResponse, UpstreamError> {
        self.get_json("air pollution", "/data/2.5/air_pollution", &self.base_params())
            .await
    }

    /// Fetch the 7-day daily forecast (One Call 3.0)
    pub async fn fetch_daily_forecast(&self) -> Result<OwOneCallResponse, UpstreamError> {
        let params = self.localized(&[("exclude", "current,minutely,hourly,alerts")]);
        self.get_json("daily forecast", "/data/3.0/onecall", &params)
            .await
    }

    /// Fetch the 5-day forecast in 3-hour steps
    pub async fn fetch_three_hourly_forecast(&self) -> Result<OwForecastResponse, UpstreamError> {
        self.get_json("3-hour forecast", "/data/2.5/forecast", &self.localized(&[]))
            .await
    }

    fn base_params(&self) -> Vec<(&str, String)> {
        vec![
            ("lat", self.location.lat.to_string()),
            ("lon", self.location.lon.to_string()),
            ("appid", self.api_key.clone()),
        ]
    }

    /// Base params plus metric units and response language
    fn localized<'a>(&'a self, extra: &[(&'a str, &str)]) -> Vec<(&'a str, String)> {
        let mut params = self.base_params();
        params.push(("units", "metric".to_string()));
        params.push(("lang", self.lang.clone()));
        params.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint, %url, "requesting upstream");

        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { endpoint, status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        let config = AppConfig {
            api_key: "test-key".to_string(),
            port: 0,
            location: Location::default(),
            upstream: UpstreamConfig {
                base_url: format!("{}/", server.uri()),
                timeout_secs: 5,
                ..Default::default()
            },
        };
        OpenWeatherClient::new(&config).expect("client")
    }

    #[tokio::test]
    async fn test_current_sends_metric_japanese_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "35.6762"))
            .and(query_param("lon", "139.6503"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "ja"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": 9.6, "feels_like": 7.2, "humidity": 40},
                "weather": [{"main": "Clear", "description": "晴天"}],
                "sys": {"sunrise": 1768254480, "sunset": 1768290840}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.base_url(), server.uri());

        let current = client.fetch_current().await.expect("current");
        assert_eq!(current.main.humidity, 40);
        assert_eq!(current.weather[0].description, "晴天");
    }

    #[tokio::test]
    async fn test_uv_omits_units_and_lang() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/uvi"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lat": 35.68, "lon": 139.65, "value": 2.37
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let uv = client.fetch_uv_index().await.expect("uv");
        assert_eq!(uv.value, 2.37);

        let requests = server.received_requests().await.expect("recording");
        let query = requests[0].url.query().unwrap_or_default().to_string();
        assert!(!query.contains("units="));
        assert!(!query.contains("lang="));
    }

    #[tokio::test]
    async fn test_daily_forecast_excludes_other_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .and(query_param("exclude", "current,minutely,hourly,alerts"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "daily": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = client_for(&server).fetch_daily_forecast().await.expect("daily");
        assert!(forecast.daily.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/3.0/onecall"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "cod": 401, "message": "Please note that using One Call 3.0 requires a separate subscription"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_daily_forecast().await.unwrap_err();
        match err {
            UpstreamError::Status { endpoint, status } => {
                assert_eq!(endpoint, "daily forecast");
                assert_eq!(status.as_u16(), 401);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/uvi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_uv_index().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { endpoint: "uv index", .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = AppConfig {
            api_key: "test-key".to_string(),
            port: 0,
            location: Location::default(),
            upstream: UpstreamConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                timeout_secs: 2,
                ..Default::default()
            },
        };
        let client = OpenWeatherClient::new(&config).expect("client");
        let err = client.fetch_current().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport { endpoint: "current weather", .. }));
    }

    #[tokio::test]
    async fn test_air_pollution_tolerates_missing_components() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [{"main": {"aqi": 2}}]
            })))
            .mount(&server)
            .await;

        let air = client_for(&server).fetch_air_pollution().await.expect("air");
        assert_eq!(air.list[0].main.aqi, Some(2));
        assert_eq!(air.list[0].components.pm2_5, None);
    }
}
