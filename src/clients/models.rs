/// Response shapes of the OpenWeatherMap endpoints, reduced to the fields we read
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwCondition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

/// `/data/2.5/weather`
#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    pub main: OwCurrentMain,
    #[serde(default)]
    pub weather: Vec<OwCondition>,
    pub sys: OwSys,
}

#[derive(Debug, Deserialize)]
pub struct OwCurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct OwSys {
    pub sunrise: i64,
    pub sunset: i64,
}

/// `/data/2.5/uvi`
#[derive(Debug, Deserialize)]
pub struct OwUvResponse {
    pub value: f64,
}

/// `/data/2.5/air_pollution`
#[derive(Debug, Deserialize)]
pub struct OwAirResponse {
    #[serde(default)]
    pub list: Vec<OwAirEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OwAirEntry {
    pub main: OwAirMain,
    #[serde(default)]
    pub components: OwAirComponents,
}

#[derive(Debug, Deserialize)]
pub struct OwAirMain {
    pub aqi: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwAirComponents {
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
}

/// `/data/3.0/onecall` with everything but `daily` excluded
#[derive(Debug, Deserialize)]
pub struct OwOneCallResponse {
    #[serde(default)]
    pub daily: Vec<OwDailyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OwDailyEntry {
    pub dt: i64,
    pub temp: OwDailyTemp,
    #[serde(default)]
    pub weather: Vec<OwCondition>,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct OwDailyTemp {
    pub min: f64,
    pub max: f64,
}

/// `/data/2.5/forecast`, 3-hour steps over 5 days
#[derive(Debug, Deserialize)]
pub struct OwForecastResponse {
    pub list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastEntry {
    pub dt_txt: String,
    pub main: OwForecastMain,
    #[serde(default)]
    pub weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

/// First condition entry, or an empty one when the provider omits it
pub fn first_condition(weather: &[OwCondition]) -> OwCondition {
    weather.first().cloned().unwrap_or_default()
}
