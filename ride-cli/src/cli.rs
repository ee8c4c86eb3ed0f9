use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use ride_core::{
    Conditions, Config, DailySummary, FixedLocation, ForecastSession, HourlyDetail, LadderVariant,
    WeatherApiProvider, WeatherError, WeatherForecast, error::truncate_detail,
    location::parse_coordinates, recommend, riding_score, score::ScoreBand,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "ride", version, about = "Riding forecast: how good is the weather for a ride?")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Target {
    /// Coordinates as LAT,LON; defaults to the configured home location.
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub at: Option<String>,

    /// Forecast day, 0 is today.
    #[arg(long, default_value_t = 0)]
    pub day: usize,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and an optional home location.
    Configure,

    /// Daily summary with riding score and recommendation.
    Summary {
        #[command(flatten)]
        target: Target,
    },

    /// Hour-by-hour riding scores for one day.
    Hourly {
        #[command(flatten)]
        target: Target,

        /// Hour to show in detail; defaults to the current hour.
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..24))]
        hour: Option<u8>,
    },

    /// Score conditions given on the command line, without fetching.
    Score {
        /// Temperature in °C.
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,

        /// Wind speed in km/h.
        #[arg(long, default_value_t = 0.0)]
        wind: f64,

        /// Chance of rain in percent.
        #[arg(long, default_value_t = 0.0)]
        precipitation: f64,

        /// Relative humidity in percent.
        #[arg(long, default_value_t = 0.0)]
        humidity: f64,

        /// Condition text, e.g. "Patchy rain nearby".
        #[arg(long, default_value = "")]
        condition: String,

        /// Use the daily-summary recommendation rules.
        #[arg(long)]
        daily: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Summary { target } => {
                let (place, forecasts) = fetch(&target).await?;
                let summary = DailySummary::new(place, &forecasts)
                    .ok_or_else(|| anyhow!("The provider returned no forecast days"))?;
                let summary = summary.select(target.day).ok_or_else(|| {
                    anyhow!("Day {} is outside the {}-day forecast", target.day, forecasts.len())
                })?;

                if target.json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    print!("{}", output::summary(&summary));
                }
                Ok(())
            }
            Command::Hourly { target, hour } => {
                let (place, forecasts) = fetch(&target).await?;
                let day = pick_day(&forecasts, target.day)?;
                let detail = match hour {
                    Some(h) => HourlyDetail::new(place, day, h as usize),
                    None => HourlyDetail::starting_now(place, day),
                };

                if target.json {
                    println!("{}", serde_json::to_string_pretty(&detail)?);
                } else {
                    print!("{}", output::hourly(&detail));
                }
                Ok(())
            }
            Command::Score { temperature, wind, precipitation, humidity, condition, daily } => {
                let sample = Conditions {
                    temperature,
                    wind_speed: wind,
                    precipitation,
                    humidity,
                    condition,
                };
                let variant = if daily { LadderVariant::Daily } else { LadderVariant::Hourly };
                let score = riding_score(&sample);

                print!(
                    "{}",
                    output::score(score, ScoreBand::from_score(score), recommend(&sample, variant))
                );
                Ok(())
            }
        }
    }
}

fn pick_day(forecasts: &[WeatherForecast], day: usize) -> anyhow::Result<&WeatherForecast> {
    forecasts
        .get(day)
        .ok_or_else(|| anyhow!("Day {day} is outside the {}-day forecast", forecasts.len()))
}

async fn fetch(target: &Target) -> anyhow::Result<(String, Vec<WeatherForecast>)> {
    let config = Config::load()?;
    tracing::debug!(
        configured = config.is_configured(),
        has_location = config.location.is_some(),
        days = config.forecast_days(),
        "loaded configuration"
    );

    let coordinates = match target.at.as_deref() {
        Some(at) => Some(parse_coordinates(at)?),
        None => config.location,
    };

    let provider = WeatherApiProvider::from_config(&config).map_err(report)?;
    let mut session =
        ForecastSession::new(Box::new(provider), Box::new(FixedLocation::new(coordinates)))
            .with_days(config.forecast_days());

    session.refresh().await.map_err(report)?;

    let place = session.place().unwrap_or_default().to_string();
    Ok((place, session.forecasts().to_vec()))
}

/// Message plus diagnostic detail, for display.
fn report(err: WeatherError) -> anyhow::Error {
    match err.detail() {
        Some(detail) if !detail.is_empty() => {
            anyhow!("{err} [{}]\n{}", err.code(), truncate_detail(detail, 500))
        }
        _ => anyhow!("{err} [{}]", err.code()),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let current = config
        .location
        .map(|c| format!("{},{}", c.latitude, c.longitude))
        .unwrap_or_default();
    let location = Text::new("Home location as LAT,LON (empty to skip):")
        .with_initial_value(&current)
        .prompt()
        .context("Failed to read home location")?;
    if !location.trim().is_empty() {
        config.set_location(parse_coordinates(&location)?);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_summary_with_negative_coordinates() {
        let cli = Cli::try_parse_from(["ride", "summary", "--at", "-33.87,151.21", "--day", "2"])
            .unwrap();
        match cli.command {
            Command::Summary { target } => {
                assert_eq!(target.at.as_deref(), Some("-33.87,151.21"));
                assert_eq!(target.day, 2);
                assert!(!target.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verbose_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["ride", "hourly", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn hourly_rejects_hour_out_of_range() {
        assert!(Cli::try_parse_from(["ride", "hourly", "--hour", "24"]).is_err());
        assert!(Cli::try_parse_from(["ride", "hourly", "--hour", "23"]).is_ok());
    }

    #[test]
    fn score_accepts_negative_temperature() {
        let cli = Cli::try_parse_from([
            "ride",
            "score",
            "--temperature",
            "-4",
            "--condition",
            "Light snow",
            "--daily",
        ])
        .unwrap();
        match cli.command {
            Command::Score { temperature, daily, .. } => {
                assert_eq!(temperature, -4.0);
                assert!(daily);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn hourly_json_carries_place() {
        let day = WeatherForecast {
            date: "2024-05-06".into(),
            temperature: 22.0,
            condition: "Sunny".into(),
            wind_speed: 5.0,
            precipitation: 10.0,
            humidity: 60.0,
            hours: Vec::new(),
        };
        let detail = HourlyDetail::new("London, City of London", &day, 0);
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["place"], "London, City of London");
        assert_eq!(json["date"], "2024-05-06");
    }

    #[test]
    fn pick_day_out_of_range() {
        let err = pick_day(&[], 0).unwrap_err();
        assert!(err.to_string().contains("outside the 0-day forecast"));
    }

    #[test]
    fn report_includes_code_and_detail() {
        let err = report(WeatherError::http_status(403, "Forbidden", "quota exceeded"));
        let msg = err.to_string();
        assert!(msg.contains("Weather API error: 403 - Forbidden [403]"));
        assert!(msg.contains("quota exceeded"));
    }
}
