/// View models handed to the page template
use serde::Serialize;

/// Result of an optional upstream call, kept explicit so the page can tell
/// "fetch failed" apart from an empty value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    Unavailable,
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }
}

/// Current conditions at the configured location
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: u8,
    pub weather: String,
    pub description: String,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AqiLevel {
    pub label: &'static str,
    pub color: &'static str,
}

/// AQI 1..=5 in order
const AQI_LEVELS: [AqiLevel; 5] = [
    AqiLevel { label: "優", color: "#00ff00" },
    AqiLevel { label: "良", color: "#ffff00" },
    AqiLevel { label: "普通", color: "#ff9900" },
    AqiLevel { label: "悪い", color: "#ff0000" },
    AqiLevel { label: "非常に悪い", color: "#8b0000" },
];

const AQI_UNKNOWN: AqiLevel = AqiLevel {
    label: "不明",
    color: "#999999",
};

impl AqiLevel {
    pub fn from_index(aqi: Option<i64>) -> Self {
        match aqi {
            Some(n @ 1..=5) => AQI_LEVELS[(n - 1) as usize],
            _ => AQI_UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQuality {
    #[serde(flatten)]
    pub level: AqiLevel,
    pub pm25: f64,
    pub pm10: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UvIndex(pub f64);

/// One forecast row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD（曜）`
    pub date: String,
    pub temp_min: i64,
    pub temp_max: i64,
    pub description: String,
    pub humidity: u8,
}

/// Which upstream produced the forecast rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    Daily,
    ThreeHourly,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherView {
    pub current: CurrentConditions,
    pub uv_index: Availability<UvIndex>,
    pub air_quality: Availability<AirQuality>,
    pub forecast: Vec<ForecastDay>,
    pub forecast_source: ForecastSource,
    pub current_date: String,
    pub current_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorView {
    pub message: String,
}

/// Everything the index template can be asked to render
#[derive(Debug, Clone)]
pub enum PageView {
    Weather(Box<WeatherView>),
    Error(ErrorView),
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aqi_table() {
        let expected = [
            (1, "優", "#00ff00"),
            (2, "良", "#ffff00"),
            (3, "普通", "#ff9900"),
            (4, "悪い", "#ff0000"),
            (5, "非常に悪い", "#8b0000"),
        ];
        for (aqi, label, color) in expected {
            let level = AqiLevel::from_index(Some(aqi));
            assert_eq!(level.label, label, "aqi {}", aqi);
            assert_eq!(level.color, color, "aqi {}", aqi);
        }
    }

    #[test]
    fn test_aqi_out_of_range_is_unknown() {
        for aqi in [Some(0), Some(6), Some(-1), Some(100), None] {
            assert_eq!(AqiLevel::from_index(aqi), AQI_UNKNOWN);
        }
        assert_eq!(AQI_UNKNOWN.label, "不明");
        assert_eq!(AQI_UNKNOWN.color, "#999999");
    }

    #[test]
    fn test_availability_serializes_tagged() {
        let uv: Availability<UvIndex> = Availability::Available(UvIndex(3.2));
        assert_eq!(
            serde_json::to_value(&uv).unwrap(),
            serde_json::json!({"status": "available", "value": 3.2})
        );

        let none: Availability<UvIndex> = Availability::Unavailable;
        assert_eq!(
            serde_json::to_value(&none).unwrap(),
            serde_json::json!({"status": "unavailable"})
        );
    }

    #[test]
    fn test_air_quality_flattens_level() {
        let aq = Availability::Available(AirQuality {
            level: AqiLevel::from_index(Some(2)),
            pm25: 8.5,
            pm10: 12.0,
        });
        assert_eq!(
            serde_json::to_value(&aq).unwrap(),
            serde_json::json!({
                "status": "available",
                "value": {"label": "良", "color": "#ffff00", "pm25": 8.5, "pm10": 12.0}
            })
        );
    }

    #[test]
    fn test_is_available() {
        assert!(Availability::Available(UvIndex(0.0)).is_available());
        assert!(!Availability::<UvIndex>::Unavailable.is_available());
    }
}
