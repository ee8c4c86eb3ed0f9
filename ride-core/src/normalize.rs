//! Conversion from the WeatherAPI.com forecast payload into [`WeatherForecast`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    error::WeatherError,
    model::{HOURS_PER_DAY, HourlyForecast, WeatherForecast},
};

const MISSING_FORECAST: &str = "Invalid response format: missing forecast data";

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    #[serde(deserialize_with = "number")]
    maxtemp_c: f64,
    #[serde(deserialize_with = "number")]
    maxwind_kph: f64,
    #[serde(deserialize_with = "number")]
    daily_chance_of_rain: f64,
    #[serde(deserialize_with = "number")]
    avghumidity: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    time: String,
    #[serde(deserialize_with = "number")]
    temp_c: f64,
    condition: WaCondition,
    #[serde(deserialize_with = "number")]
    wind_kph: f64,
    #[serde(deserialize_with = "number")]
    chance_of_rain: f64,
    #[serde(deserialize_with = "number")]
    humidity: f64,
    #[serde(deserialize_with = "number")]
    vis_km: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    hour: Vec<WaHour>,
}

/// Some plans send percentages as strings (`"86"`), others as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

/// Nearest integer with halves rounded up, so `-2.5` becomes `-2`.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// `"2024-05-01 13:00"` becomes `"13:00"`.
fn time_of_day(stamp: &str) -> String {
    match stamp.split_once(' ') {
        Some((_, time)) => time.to_string(),
        None => stamp.to_string(),
    }
}

fn convert_hour(hour: WaHour) -> HourlyForecast {
    HourlyForecast {
        time: time_of_day(&hour.time),
        temperature: round_half_up(hour.temp_c),
        condition: hour.condition.text,
        wind_speed: round_half_up(hour.wind_kph),
        precipitation: hour.chance_of_rain,
        humidity: hour.humidity,
        visibility: hour.vis_km,
    }
}

fn convert_day(day: WaForecastDay) -> WeatherForecast {
    if day.hour.len() != HOURS_PER_DAY {
        tracing::warn!(date = %day.date, hours = day.hour.len(), "forecast day does not carry 24 hours");
    }

    WeatherForecast {
        date: day.date,
        temperature: round_half_up(day.day.maxtemp_c),
        condition: day.day.condition.text,
        wind_speed: round_half_up(day.day.maxwind_kph),
        precipitation: round_half_up(day.day.daily_chance_of_rain),
        humidity: round_half_up(day.day.avghumidity),
        hours: day.hour.into_iter().map(convert_hour).collect(),
    }
}

/// Normalize an already-parsed provider payload, keeping the provider's day order.
pub fn normalize(payload: &Value) -> Result<Vec<WeatherForecast>, WeatherError> {
    let days = payload
        .get("forecast")
        .and_then(|f| f.get("forecastday"))
        .filter(|d| d.is_array())
        .ok_or_else(|| WeatherError::malformed(MISSING_FORECAST, payload.to_string()))?;

    let days: Vec<WaForecastDay> = Vec::<WaForecastDay>::deserialize(days).map_err(|e| {
        WeatherError::malformed(format!("Invalid response format: {e}"), payload.to_string())
    })?;

    let forecasts: Vec<WeatherForecast> = days.into_iter().map(convert_day).collect();
    tracing::debug!(days = forecasts.len(), "normalized forecast payload");

    Ok(forecasts)
}

/// Normalize a raw response body.
pub fn normalize_str(body: &str) -> Result<Vec<WeatherForecast>, WeatherError> {
    let payload: Value = serde_json::from_str(body).map_err(|e| {
        WeatherError::malformed(format!("Invalid response format: {e}"), body.to_string())
    })?;

    normalize(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hour(date: &str, h: usize) -> Value {
        let temp_c = 14.6 + h as f64 * 0.1;
        json!({
            "time": format!("{date} {h:02}:00"),
            "temp_c": temp_c,
            "condition": { "text": "Patchy rain nearby" },
            "wind_kph": 12.4,
            "chance_of_rain": 37,
            "humidity": 81,
            "vis_km": 9.5
        })
    }

    fn day(date: &str) -> Value {
        json!({
            "date": date,
            "day": {
                "maxtemp_c": 18.5,
                "maxwind_kph": 20.2,
                "daily_chance_of_rain": 64,
                "avghumidity": 72.4,
                "condition": { "text": "Moderate rain" }
            },
            "hour": (0..24).map(|h| hour(date, h)).collect::<Vec<_>>()
        })
    }

    fn payload(dates: &[&str]) -> Value {
        json!({
            "location": { "name": "London" },
            "forecast": { "forecastday": dates.iter().map(|d| day(d)).collect::<Vec<_>>() }
        })
    }

    #[test]
    fn three_days_of_twenty_four_hours_in_order() {
        let dates = ["2024-05-01", "2024-05-02", "2024-05-03"];
        let forecasts = normalize(&payload(&dates)).expect("valid payload");

        assert_eq!(forecasts.len(), 3);
        for (forecast, date) in forecasts.iter().zip(dates) {
            assert_eq!(forecast.date, date);
            assert_eq!(forecast.hours.len(), 24);
            for (i, h) in forecast.hours.iter().enumerate() {
                assert_eq!(h.time, format!("{i:02}:00"));
            }
        }
    }

    #[test]
    fn daily_fields_are_rounded() {
        let forecasts = normalize(&payload(&["2024-05-01"])).unwrap();
        let d = &forecasts[0];

        assert_eq!(d.temperature, 19.0);
        assert_eq!(d.wind_speed, 20.0);
        assert_eq!(d.precipitation, 64.0);
        assert_eq!(d.humidity, 72.0);
        assert_eq!(d.condition, "Moderate rain");
    }

    #[test]
    fn hourly_precipitation_humidity_visibility_pass_through() {
        let mut p = payload(&["2024-05-01"]);
        p["forecast"]["forecastday"][0]["hour"][0]["humidity"] = json!(80.6);
        p["forecast"]["forecastday"][0]["hour"][0]["chance_of_rain"] = json!(12.5);

        let forecasts = normalize(&p).unwrap();
        let h = &forecasts[0].hours[0];

        assert_eq!(h.temperature, 15.0);
        assert_eq!(h.wind_speed, 12.0);
        assert_eq!(h.precipitation, 12.5);
        assert_eq!(h.humidity, 80.6);
        assert_eq!(h.visibility, 9.5);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut p = payload(&["2024-05-01"]);
        p["forecast"]["forecastday"][0]["day"]["daily_chance_of_rain"] = json!("86");

        let forecasts = normalize(&p).unwrap();
        assert_eq!(forecasts[0].precipitation, 86.0);
    }

    #[test]
    fn negative_halves_round_up() {
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn missing_forecastday_is_malformed() {
        let err = normalize(&json!({ "forecast": {} })).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse { .. }));
        assert_eq!(err.code(), "INVALID_RESPONSE");
        assert!(err.to_string().contains("missing forecast data"));
    }

    #[test]
    fn provider_error_body_is_malformed_and_kept_for_diagnostics() {
        let body = json!({ "error": { "code": 1006, "message": "No matching location found." } });
        let err = normalize(&body).unwrap_err();

        assert!(err.detail().unwrap().contains("No matching location found."));
    }

    #[test]
    fn forecastday_of_wrong_shape_is_malformed() {
        let err = normalize(&json!({ "forecast": { "forecastday": "soon" } })).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse { .. }));
    }

    #[test]
    fn missing_hour_field_is_malformed() {
        let mut p = payload(&["2024-05-01"]);
        p["forecast"]["forecastday"][0]["hour"][3]
            .as_object_mut()
            .unwrap()
            .remove("vis_km");

        let err = normalize(&p).unwrap_err();
        assert!(err.to_string().contains("vis_km"));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = normalize_str("<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.code(), "INVALID_RESPONSE");
        assert_eq!(err.detail(), Some("<html>502 Bad Gateway</html>"));
    }

    #[test]
    fn time_without_date_is_kept() {
        assert_eq!(time_of_day("07:00"), "07:00");
        assert_eq!(time_of_day("2024-05-01 07:00"), "07:00");
    }
}
