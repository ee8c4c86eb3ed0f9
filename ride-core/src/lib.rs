//! Core library for the `ride` CLI.
//!
//! This crate defines:
//! - Forecast models and normalization of the WeatherAPI.com payload
//! - Condition classification, riding score and recommendations
//! - The upstream provider client, location handling and configuration
//! - View state for the daily summary and hourly detail
//!
//! It is used by `ride-cli`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod recommendation;
pub mod score;
pub mod session;
pub mod view;

pub use condition::ConditionCategory;
pub use config::Config;
pub use error::WeatherError;
pub use location::{FixedLocation, LocationSource};
pub use model::{Conditions, Coordinates, ForecastRequest, HourlyForecast, RidingSample, WeatherForecast};
pub use normalize::{normalize, normalize_str};
pub use provider::{ForecastProvider, WeatherApiProvider};
pub use recommendation::{LadderVariant, Recommendation, recommend};
pub use score::{ScoreBand, riding_score};
pub use session::ForecastSession;
pub use view::{DailySummary, HourlyDetail};
