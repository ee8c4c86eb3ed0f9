use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Coordinates, ForecastRequest, WeatherForecast},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Upstream forecast source.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Normalized forecast days in provider order.
    async fn get_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<Vec<WeatherForecast>, WeatherError>;

    /// Reverse lookup of a place name, `None` when nothing matches.
    async fn place_name(&self, coordinates: &Coordinates) -> Result<Option<String>, WeatherError>;
}
