//! Riding score: a 0–100 suitability figure for a forecast sample.
//!
//! ```text
//! score = 100 − 2·W − 10·P − 15·R − 1·H − 5·V − 2·|T − 22|
//! ```
//!
//! `W` is wind in km/h, `T` is °C, `P` and `H` are percentages scaled to 0–1,
//! and `R`/`V` are condition-derived road and visibility values scaled to 0–1.
//! Storms, snow, freezing and violent conditions veto the formula entirely.

use serde::Serialize;

use crate::model::RidingSample;

pub const WIND_WEIGHT: f64 = 2.0;
pub const PRECIPITATION_WEIGHT: f64 = 10.0;
pub const ROAD_WEIGHT: f64 = 15.0;
pub const HUMIDITY_WEIGHT: f64 = 1.0;
pub const VISIBILITY_WEIGHT: f64 = 5.0;
pub const TEMPERATURE_WEIGHT: f64 = 2.0;

pub const IDEAL_TEMPERATURE_C: f64 = 22.0;

const VETO_TERMS: [&str; 4] = ["thunderstorm", "snow", "freezing", "violent"];

/// Visibility impact on a 0–10 scale. Expects lowercased text.
pub fn visibility_value(condition: &str) -> f64 {
    if condition.contains("fog") || condition.contains("mist") {
        8.0
    } else if condition.contains("heavy rain") {
        6.0
    } else if condition.contains("rain") {
        4.0
    } else if condition.contains("overcast") {
        2.0
    } else if condition.contains("cloudy") {
        1.0
    } else {
        0.0
    }
}

/// Road condition impact on a 0–10 scale. Expects lowercased text.
pub fn road_value(condition: &str) -> f64 {
    if condition.contains("thunderstorm") || condition.contains("snow") {
        10.0
    } else if condition.contains("heavy rain") {
        8.0
    } else if condition.contains("rain") {
        5.0
    } else if condition.contains("drizzle") {
        2.0
    } else {
        0.0
    }
}

/// Storm, snow, freezing or violent conditions. Expects lowercased text.
fn is_vetoed(condition: &str) -> bool {
    VETO_TERMS.iter().any(|term| condition.contains(term))
}

pub fn riding_score<S: RidingSample + ?Sized>(sample: &S) -> u8 {
    let conditions = sample.condition().to_lowercase();

    if is_vetoed(&conditions) {
        return 0;
    }

    let wind = sample.wind_speed() * WIND_WEIGHT;
    let precipitation = sample.precipitation() / 100.0 * PRECIPITATION_WEIGHT;
    let road = road_value(&conditions) / 10.0 * ROAD_WEIGHT;
    let humidity = sample.humidity() / 100.0 * HUMIDITY_WEIGHT;
    let visibility = visibility_value(&conditions) / 10.0 * VISIBILITY_WEIGHT;
    let temperature = (sample.temperature() - IDEAL_TEMPERATURE_C).abs() * TEMPERATURE_WEIGHT;

    let score = 100.0 - wind - precipitation - road - humidity - visibility - temperature;

    clamp_score(score)
}

/// Round half up, then clamp into 0..=100. NaN maps to 0.
fn clamp_score(score: f64) -> u8 {
    let rounded = (score + 0.5).floor();
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, 100.0) as u8
}

/// Colour band for presenting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "#2ecc71",
            ScoreBand::Good => "#f1c40f",
            ScoreBand::Fair => "#e67e22",
            ScoreBand::Poor => "#e74c3c",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }
}
