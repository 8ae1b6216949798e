/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub port: u16,
    pub location: Location,
    pub upstream: UpstreamConfig,
}

/// The single place this service reports on
#[derive(Clone, Debug)]
pub struct Location {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub lang: String,
    pub timeout_secs: u64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: "Tokyo".to_string(),
            lat: 35.6762,
            lon: 139.6503,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            lang: "ja".to_string(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // An empty key is allowed; the index page reports it instead of failing startup.
        let api_key = env::var("OPENWEATHER_API_KEY")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let port = env_parse("PORT", 5000u16);

        let defaults = Location::default();
        let location = Location {
            city: env::var("WEATHER_CITY").unwrap_or(defaults.city),
            lat: env_parse("WEATHER_LAT", defaults.lat),
            lon: env_parse("WEATHER_LON", defaults.lon),
        };

        let defaults = UpstreamConfig::default();
        let upstream = UpstreamConfig {
            base_url: env::var("OPENWEATHER_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            lang: env::var("WEATHER_LANG").unwrap_or(defaults.lang),
            timeout_secs: env_parse("UPSTREAM_TIMEOUT_SECS", defaults.timeout_secs),
        };

        Ok(Self {
            api_key,
            port,
            location,
            upstream,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
