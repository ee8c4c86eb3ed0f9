//! Immutable view state for the daily summary and the hourly detail.
//!
//! Each view is built from normalized forecasts and owns everything needed
//! to present it. Changing the selection produces a new value.

use chrono::{NaiveDate, Timelike};
use serde::Serialize;

use crate::{
    condition::ConditionCategory,
    model::{HourlyForecast, WeatherForecast},
    recommendation::{LadderVariant, Recommendation, recommend},
    score::{ScoreBand, riding_score},
};

/// Label for one day tab, e.g. `MON` / `6` / `MON, May 6`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTab {
    pub weekday: String,
    pub day_of_month: String,
    pub full_date: String,
}

impl DayTab {
    fn from_date(date: &str) -> Self {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(d) => {
                let weekday = d.format("%a").to_string().to_uppercase();
                Self {
                    full_date: format!("{weekday}, {}", d.format("%b %-d")),
                    day_of_month: d.format("%-d").to_string(),
                    weekday,
                }
            }
            Err(_) => Self {
                weekday: date.to_string(),
                day_of_month: date.to_string(),
                full_date: date.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub date: String,
    pub tab: DayTab,
    pub condition: String,
    pub category: ConditionCategory,
    pub icon: &'static str,
    pub temperature: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub score: u8,
    pub band: ScoreBand,
    pub recommendation: Recommendation,
}

impl DayCard {
    fn new(day: &WeatherForecast) -> Self {
        let category = ConditionCategory::classify(&day.condition);
        let score = riding_score(day);

        Self {
            date: day.date.clone(),
            tab: DayTab::from_date(&day.date),
            condition: day.condition.clone(),
            category,
            icon: category.icon(),
            temperature: day.temperature,
            wind_speed: day.wind_speed,
            precipitation: day.precipitation,
            humidity: day.humidity,
            score,
            band: ScoreBand::from_score(score),
            recommendation: recommend(day, LadderVariant::Daily),
        }
    }
}

/// Tabbed per-day summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    place: String,
    days: Vec<DayCard>,
    selected: usize,
}

impl DailySummary {
    /// `None` when there are no forecast days to show.
    pub fn new(place: impl Into<String>, forecasts: &[WeatherForecast]) -> Option<Self> {
        if forecasts.is_empty() {
            return None;
        }

        Some(Self {
            place: place.into(),
            days: forecasts.iter().map(DayCard::new).collect(),
            selected: 0,
        })
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn days(&self) -> &[DayCard] {
        &self.days
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&self, index: usize) -> Option<Self> {
        (index < self.days.len()).then(|| Self { selected: index, ..self.clone() })
    }

    pub fn selected_day(&self) -> &DayCard {
        &self.days[self.selected]
    }

    pub fn tabs(&self) -> impl Iterator<Item = &DayTab> {
        self.days.iter().map(|d| &d.tab)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourPoint {
    pub index: usize,
    pub time: String,
    pub condition: String,
    pub icon: &'static str,
    pub temperature: f64,
    pub wind_speed: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub visibility: f64,
    pub score: u8,
    pub band: ScoreBand,
    pub recommendation: Recommendation,
}

impl HourPoint {
    fn new(index: usize, hour: &HourlyForecast) -> Self {
        let score = riding_score(hour);

        Self {
            index,
            time: hour.time.clone(),
            condition: hour.condition.clone(),
            icon: ConditionCategory::classify(&hour.condition).icon(),
            temperature: hour.temperature,
            wind_speed: hour.wind_speed,
            precipitation: hour.precipitation,
            humidity: hour.humidity,
            visibility: hour.visibility,
            score,
            band: ScoreBand::from_score(score),
            recommendation: recommend(hour, LadderVariant::Hourly),
        }
    }
}

/// Hour-by-hour scores for one day with a selected hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDetail {
    place: String,
    date: String,
    points: Vec<HourPoint>,
    selected: Option<usize>,
}

impl HourlyDetail {
    /// Selection starts at `hour`, clamped to the last available hour.
    pub fn new(place: impl Into<String>, day: &WeatherForecast, hour: usize) -> Self {
        let points: Vec<HourPoint> =
            day.hours.iter().enumerate().map(|(i, h)| HourPoint::new(i, h)).collect();
        let selected = points.len().checked_sub(1).map(|last| hour.min(last));

        Self { place: place.into(), date: day.date.clone(), points, selected }
    }

    /// Selection starts at the current local hour.
    pub fn starting_now(place: impl Into<String>, day: &WeatherForecast) -> Self {
        Self::new(place, day, chrono::Local::now().hour() as usize)
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn points(&self) -> &[HourPoint] {
        &self.points
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&self, index: usize) -> Option<Self> {
        (index < self.points.len()).then(|| Self { selected: Some(index), ..self.clone() })
    }

    pub fn selected_point(&self) -> Option<&HourPoint> {
        self.selected.and_then(|i| self.points.get(i))
    }

    pub fn scores(&self) -> Vec<u8> {
        self.points.iter().map(|p| p.score).collect()
    }
}
