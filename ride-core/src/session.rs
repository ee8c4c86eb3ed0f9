use crate::{
    error::WeatherError,
    location::{LocationSource, describe_location},
    model::{Coordinates, DEFAULT_FORECAST_DAYS, ForecastRequest, WeatherForecast},
    provider::ForecastProvider,
};

/// Holds the last successfully fetched forecast for a location.
///
/// A refresh runs location, place lookup and forecast fetch in sequence.
/// When any step fails the previous data stays in place and the error is
/// kept alongside it.
#[derive(Debug)]
pub struct ForecastSession {
    provider: Box<dyn ForecastProvider>,
    location: Box<dyn LocationSource>,
    days: u8,
    coordinates: Option<Coordinates>,
    place: Option<String>,
    forecasts: Vec<WeatherForecast>,
    last_error: Option<WeatherError>,
}

impl ForecastSession {
    pub fn new(provider: Box<dyn ForecastProvider>, location: Box<dyn LocationSource>) -> Self {
        Self {
            provider,
            location,
            days: DEFAULT_FORECAST_DAYS,
            coordinates: None,
            place: None,
            forecasts: Vec::new(),
            last_error: None,
        }
    }

    pub fn with_days(mut self, days: u8) -> Self {
        self.days = days;
        self
    }

    pub async fn refresh(&mut self) -> Result<&[WeatherForecast], WeatherError> {
        match self.fetch().await {
            Ok((coordinates, place, forecasts)) => {
                tracing::info!(%place, days = forecasts.len(), "forecast refreshed");
                self.coordinates = Some(coordinates);
                self.place = Some(place);
                self.forecasts = forecasts;
                self.last_error = None;
                Ok(&self.forecasts)
            }
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "forecast refresh failed");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<(Coordinates, String, Vec<WeatherForecast>), WeatherError> {
        let coordinates = self.location.locate().await?;
        let place = describe_location(self.provider.as_ref(), &coordinates).await;

        let request = ForecastRequest { coordinates, days: self.days };
        let forecasts = self.provider.get_forecast(&request).await?;

        Ok((coordinates, place, forecasts))
    }

    pub fn forecasts(&self) -> &[WeatherForecast] {
        &self.forecasts
    }

    pub fn place(&self) -> Option<&str> {
        self.place.as_deref()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn last_error(&self) -> Option<&WeatherError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{location::FixedLocation, model::HourlyForecast};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Succeeds on the first forecast call, fails afterwards.
    #[derive(Debug, Default)]
    struct FlakyProvider {
        calls: AtomicUsize,
        place: Option<String>,
    }

    fn forecast(date: &str) -> WeatherForecast {
        WeatherForecast {
            date: date.into(),
            temperature: 20.0,
            condition: "Sunny".into(),
            wind_speed: 8.0,
            precipitation: 0.0,
            humidity: 40.0,
            hours: (0..24)
                .map(|h| HourlyForecast {
                    time: format!("{h:02}:00"),
                    temperature: 20.0,
                    condition: "Sunny".into(),
                    wind_speed: 8.0,
                    precipitation: 0.0,
                    humidity: 40.0,
                    visibility: 10.0,
                })
                .collect(),
        }
    }

    #[async_trait]
    impl ForecastProvider for FlakyProvider {
        async fn get_forecast(
            &self,
            request: &ForecastRequest,
        ) -> Result<Vec<WeatherForecast>, WeatherError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(["2024-05-06", "2024-05-07", "2024-05-08"]
                    .iter()
                    .take(request.days as usize)
                    .map(|d| forecast(d))
                    .collect())
            } else {
                Err(WeatherError::http_status(503, "Service Unavailable", "try later"))
            }
        }

        async fn place_name(
            &self,
            _coordinates: &Coordinates,
        ) -> Result<Option<String>, WeatherError> {
            Ok(self.place.clone())
        }
    }

    fn session(place: Option<&str>, at: Option<Coordinates>) -> ForecastSession {
        let provider = FlakyProvider { place: place.map(Into::into), ..Default::default() };
        ForecastSession::new(Box::new(provider), Box::new(FixedLocation::new(at)))
    }

    #[tokio::test]
    async fn refresh_populates_forecast_and_place() {
        let mut s = session(Some("London, City of London"), Some(Coordinates::new(51.5, -0.12)));

        let days = s.refresh().await.unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(s.place(), Some("London, City of London"));
        assert!(s.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_data() {
        let mut s = session(None, Some(Coordinates::new(-33.87, 151.21)));
        s.refresh().await.unwrap();

        let err = s.refresh().await.unwrap_err();
        assert_eq!(err.code(), "503");

        assert_eq!(s.forecasts().len(), 3);
        assert_eq!(s.forecasts()[0].date, "2024-05-06");
        assert_eq!(s.place(), Some("33.87°S, 151.21°E"));
        assert_eq!(s.last_error().map(|e| e.code()), Some("503"));
    }

    #[tokio::test]
    async fn missing_location_is_permission_denied() {
        let mut s = session(None, None);

        let err = s.refresh().await.unwrap_err();
        assert!(matches!(err, WeatherError::PermissionDenied { .. }));
        assert!(s.forecasts().is_empty());
        assert!(s.coordinates().is_none());
    }

    #[tokio::test]
    async fn days_are_forwarded_to_provider() {
        let mut s = session(None, Some(Coordinates::new(0.0, 0.0))).with_days(2);
        assert_eq!(s.refresh().await.unwrap().len(), 2);
    }
}
