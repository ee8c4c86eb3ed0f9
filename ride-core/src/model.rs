use serde::{Deserialize, Serialize};

/// Number of forecast days requested from the provider (free tier limit).
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Hours carried by every forecast day, index `i` is hour `i`.
pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Provider query form, `"lat,lon"`.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub coordinates: Coordinates,
    pub days: u8,
}

impl ForecastRequest {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates, days: DEFAULT_FORECAST_DAYS }
    }
}

/// One hour of a forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Local time of day, `HH:MM`.
    pub time: String,
    pub temperature: f64,
    pub condition: String,
    /// km/h
    pub wind_speed: f64,
    /// Chance of rain, percent.
    pub precipitation: f64,
    pub humidity: f64,
    /// km
    pub visibility: f64,
}

/// Aggregate weather for one calendar day plus its hourly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub date: String,
    /// Daily maximum, °C.
    pub temperature: f64,
    pub condition: String,
    /// Daily maximum, km/h.
    pub wind_speed: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub hours: Vec<HourlyForecast>,
}

/// Read-only view shared by daily and hourly samples.
///
/// The score engine and recommendation selector are written against this
/// trait so the same rules apply to both granularities.
pub trait RidingSample {
    fn temperature(&self) -> f64;
    fn wind_speed(&self) -> f64;
    fn precipitation(&self) -> f64;
    fn humidity(&self) -> f64;
    fn condition(&self) -> &str;
}

impl RidingSample for HourlyForecast {
    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    fn precipitation(&self) -> f64 {
        self.precipitation
    }

    fn humidity(&self) -> f64 {
        self.humidity
    }

    fn condition(&self) -> &str {
        &self.condition
    }
}

impl RidingSample for WeatherForecast {
    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    fn precipitation(&self) -> f64 {
        self.precipitation
    }

    fn humidity(&self) -> f64 {
        self.humidity
    }

    fn condition(&self) -> &str {
        &self.condition
    }
}

/// Ad-hoc sample built from raw metrics, e.g. from command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub condition: String,
}

impl RidingSample for Conditions {
    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    fn precipitation(&self) -> f64 {
        self.precipitation
    }

    fn humidity(&self) -> f64 {
        self.humidity
    }

    fn condition(&self) -> &str {
        &self.condition
    }
}
