//! Plain-text rendering of the core view state.

use std::fmt::Write;

use ride_core::{
    Recommendation,
    score::ScoreBand,
    view::{DailySummary, HourlyDetail},
};

const BAR_WIDTH: usize = 20;

fn bar(score: u8) -> String {
    let filled = usize::from(score) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn summary(view: &DailySummary) -> String {
    let mut out = String::new();
    let day = view.selected_day();

    let _ = writeln!(out, "📍 {}", view.place());

    let tabs: Vec<String> = view
        .tabs()
        .enumerate()
        .map(|(i, tab)| {
            let label = format!("{} {}", tab.weekday, tab.day_of_month);
            if i == view.selected() { format!("[{label}]") } else { format!(" {label} ") }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", day.tab.full_date);
    let _ = writeln!(out, "{} {}  {}°C", day.icon, day.condition, day.temperature);
    let _ = writeln!(
        out,
        "Riding score: {:>3}/100 {} ({})",
        day.score,
        bar(day.score),
        day.band.label()
    );
    let _ = writeln!(
        out,
        "💧 Precipitation {}%   💨 Wind {} km/h   💧 Humidity {}%",
        day.precipitation, day.wind_speed, day.humidity
    );
    let _ = writeln!(out, "{}", day.recommendation);

    out
}

pub fn hourly(view: &HourlyDetail) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📍 {}  {}", view.place(), view.date());
    let _ = writeln!(out, "Hourly Forecast - riding conditions throughout the day");
    let _ = writeln!(out);

    for point in view.points() {
        let marker = if view.selected() == Some(point.index) { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {} {} {:>3} {}  {:>5.1}°C",
            point.time,
            point.icon,
            point.score,
            bar(point.score),
            point.temperature
        );
    }

    if let Some(point) = view.selected_point() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}  {}°C  {}", point.time, point.temperature, point.condition);
        let _ = writeln!(
            out,
            "💧 Precipitation {}%   💨 Wind {} km/h   💧 Humidity {}%   👁 Visibility {} km",
            point.precipitation.round(),
            point.wind_speed.round(),
            point.humidity.round(),
            point.visibility
        );
        let _ = writeln!(out, "Riding score: {}/100 ({})", point.score, point.band.label());
        let _ = writeln!(out, "{}", point.recommendation);
    }

    out
}

pub fn score(score: u8, band: ScoreBand, recommendation: Recommendation) -> String {
    format!(
        "Riding score: {score}/100 {} ({}, {})\n{recommendation}\n",
        bar(score),
        band.label(),
        band.hex()
    )
}
