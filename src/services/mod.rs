/// Weather aggregation: one page worth of upstream calls
use crate::clients::models::{first_condition, OwDailyEntry, OwForecastEntry};
use crate::clients::OpenWeatherClient;
use crate::config::AppConfig;
use crate::domain::{
    AirQuality, AqiLevel, Availability, CurrentConditions, ErrorView, ForecastDay,
    ForecastSource, PageView, UvIndex, WeatherView,
};
use crate::errors::{AppError, AppResult, UpstreamError, MISSING_API_KEY_MESSAGE};
use crate::utils::{
    date_part, epoch_to_date, epoch_to_hhmm, format_date_with_weekday, round1, round_int,
};
use chrono::Local;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Rows kept from the daily (One Call) forecast
pub const DAILY_FORECAST_DAYS: usize = 7;
/// Distinct dates kept from the 3-hour forecast
pub const FALLBACK_FORECAST_DAYS: usize = 5;

pub struct WeatherService {
    client: OpenWeatherClient,
    config: AppConfig,
}

impl WeatherService {
    pub fn new(config: AppConfig, client: OpenWeatherClient) -> Self {
        Self { client, config }
    }

    /// Build the page model; any mandatory failure becomes an error view
    pub async fn page(&self) -> PageView {
        match self.weather_view().await {
            Ok(view) => PageView::Weather(Box::new(view)),
            Err(e) => {
                error!("weather view unavailable: {}", e);
                PageView::Error(ErrorView {
                    message: e.user_message(),
                })
            }
        }
    }

    /// Run every upstream step in order and assemble the view
    pub async fn weather_view(&self) -> AppResult<WeatherView> {
        if !self.config.has_api_key() {
            return Err(AppError::Config(MISSING_API_KEY_MESSAGE));
        }

        let current = self.fetch_current().await?;
        let uv_index = self.fetch_uv_index().await;
        let air_quality = self.fetch_air_quality().await;
        let (forecast_source, forecast) = self.fetch_forecast().await?;

        let now = Local::now();
        info!(
            uv = uv_index.is_available(),
            air = air_quality.is_available(),
            days = forecast.len(),
            "weather view assembled"
        );

        Ok(WeatherView {
            current,
            uv_index,
            air_quality,
            forecast,
            forecast_source,
            current_date: now.format("%Y年%m月%d日").to_string(),
            current_time: now.format("%H:%M:%S").to_string(),
        })
    }

    async fn fetch_current(&self) -> AppResult<CurrentConditions> {
        let data = self.client.fetch_current().await?;
        let condition = first_condition(&data.weather);

        let sunrise = epoch_to_hhmm(data.sys.sunrise);
        let sunset = epoch_to_hhmm(data.sys.sunset);
        let (Some(sunrise), Some(sunset)) = (sunrise, sunset) else {
            return Err(UpstreamError::Decode {
                endpoint: "current weather",
                message: "sunrise/sunset out of range".to_string(),
            }
            .into());
        };

        Ok(CurrentConditions {
            city: self.config.location.city.clone(),
            temperature: round_int(data.main.temp),
            feels_like: round_int(data.main.feels_like),
            humidity: data.main.humidity,
            weather: condition.main,
            description: condition.description,
            sunrise,
            sunset,
        })
    }

    async fn fetch_uv_index(&self) -> Availability<UvIndex> {
        match self.client.fetch_uv_index().await {
            Ok(data) => Availability::Available(UvIndex(round1(data.value))),
            Err(e) => {
                warn!("UV index unavailable: {}", e);
                Availability::Unavailable
            }
        }
    }

    async fn fetch_air_quality(&self) -> Availability<AirQuality> {
        let data = match self.client.fetch_air_pollution().await {
            Ok(data) => data,
            Err(e) => {
                warn!("air quality unavailable: {}", e);
                return Availability::Unavailable;
            }
        };

        let Some(entry) = data.list.first() else {
            warn!("air quality unavailable: air pollution returned an empty list");
            return Availability::Unavailable;
        };

        Availability::Available(AirQuality {
            level: AqiLevel::from_index(entry.main.aqi),
            pm25: round1(entry.components.pm2_5.unwrap_or(0.0)),
            pm10: round1(entry.components.pm10.unwrap_or(0.0)),
        })
    }

    /// Daily forecast first; the 3-hour forecast only when that fails
    async fn fetch_forecast(&self) -> AppResult<(ForecastSource, Vec<ForecastDay>)> {
        match self.client.fetch_daily_forecast().await {
            Ok(data) => Ok((ForecastSource::Daily, daily_forecast(&data.daily)?)),
            Err(primary) => {
                warn!(
                    endpoint = primary.endpoint(),
                    "daily forecast failed, falling back to 3-hour forecast: {}", primary
                );
                let data = self.client.fetch_three_hourly_forecast().await?;
                Ok((ForecastSource::ThreeHourly, three_hourly_forecast(&data.list)?))
            }
        }
    }
}

/// First [`DAILY_FORECAST_DAYS`] rows of the One Call `daily` block
pub fn daily_forecast(entries: &[OwDailyEntry]) -> AppResult<Vec<ForecastDay>> {
    let mut days = Vec::with_capacity(DAILY_FORECAST_DAYS);
    let mut seen = HashSet::new();

    for entry in entries.iter().take(DAILY_FORECAST_DAYS) {
        let date = epoch_to_date(entry.dt).ok_or_else(|| UpstreamError::Decode {
            endpoint: "daily forecast",
            message: format!("timestamp {} out of range", entry.dt),
        })?;
        if !seen.insert(date.clone()) {
            continue;
        }

        days.push(ForecastDay {
            date: format_date_with_weekday(&date)?,
            temp_min: round_int(entry.temp.min),
            temp_max: round_int(entry.temp.max),
            description: first_condition(&entry.weather).description,
            humidity: entry.humidity,
        });
    }

    sort_by_date(&mut days);
    Ok(days)
}

/// One row per calendar date from the 3-hour list, first entry of each
/// date wins, capped at [`FALLBACK_FORECAST_DAYS`]
pub fn three_hourly_forecast(entries: &[OwForecastEntry]) -> AppResult<Vec<ForecastDay>> {
    let mut days = Vec::with_capacity(FALLBACK_FORECAST_DAYS);
    let mut seen = HashSet::new();

    for entry in entries {
        let date = date_part(&entry.dt_txt);
        if seen.insert(date) {
            days.push(ForecastDay {
                date: format_date_with_weekday(date)?,
                temp_min: round_int(entry.main.temp_min),
                temp_max: round_int(entry.main.temp_max),
                description: first_condition(&entry.weather).description,
                humidity: entry.main.humidity,
            });
        }
        if days.len() >= FALLBACK_FORECAST_DAYS {
            break;
        }
    }

    sort_by_date(&mut days);
    Ok(days)
}

/// Rows are labelled `YYYY-MM-DD（曜）`, so text order is calendar order
fn sort_by_date(days: &mut [ForecastDay]) {
    days.sort_by(|a, b| a.date.cmp(&b.date));
}
