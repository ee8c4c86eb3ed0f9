use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::Coordinates, provider::ForecastProvider};

/// Where the rider is.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, WeatherError>;
}

/// Coordinates supplied up front, from flags or the config file.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSource for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, WeatherError> {
        self.coordinates.ok_or_else(|| WeatherError::PermissionDenied {
            message: "Location access needed".to_string(),
            detail: Some(
                "No location available. Pass `--at LAT,LON` or store a home location with \
                 `ride configure`."
                    .to_string(),
            ),
        })
    }
}

/// Parse `"51.5,-0.12"` into coordinates, validating ranges.
pub fn parse_coordinates(input: &str) -> anyhow::Result<Coordinates> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("Expected coordinates as LAT,LON, got '{input}'"))?;

    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid latitude '{}'", lat.trim()))?;
    let longitude: f64 = lon
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid longitude '{}'", lon.trim()))?;

    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("Latitude {latitude} is outside -90..90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("Longitude {longitude} is outside -180..180");
    }

    Ok(Coordinates::new(latitude, longitude))
}

/// `"51.50°N, 0.12°W"`
pub fn format_coordinates(coordinates: &Coordinates) -> String {
    let lat_dir = if coordinates.latitude >= 0.0 { 'N' } else { 'S' };
    let lon_dir = if coordinates.longitude >= 0.0 { 'E' } else { 'W' };

    format!(
        "{:.2}°{lat_dir}, {:.2}°{lon_dir}",
        coordinates.latitude.abs(),
        coordinates.longitude.abs()
    )
}

/// Human-readable place for the coordinates, never failing.
///
/// Uses the provider's reverse lookup and falls back to formatted coordinates.
pub async fn describe_location(provider: &dyn ForecastProvider, coordinates: &Coordinates) -> String {
    match provider.place_name(coordinates).await {
        Ok(Some(name)) => name,
        Ok(None) => {
            tracing::debug!("no place name found, using coordinates");
            format_coordinates(coordinates)
        }
        Err(e) => {
            tracing::warn!(error = %e, "reverse geocode failed, using coordinates");
            format_coordinates(coordinates)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_coordinates() {
        let c = parse_coordinates("51.5, -0.12").unwrap();
        assert_eq!(c, Coordinates::new(51.5, -0.12));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_coordinates("51.5").is_err());
        assert!(parse_coordinates("abc,1").unwrap_err().to_string().contains("latitude"));
        assert!(parse_coordinates("91,0").is_err());
        assert!(parse_coordinates("0,181").is_err());
    }

    #[test]
    fn format_uses_compass_directions() {
        assert_eq!(format_coordinates(&Coordinates::new(51.5074, -0.1278)), "51.51°N, 0.13°W");
        assert_eq!(format_coordinates(&Coordinates::new(-33.8688, 151.2093)), "33.87°S, 151.21°E");
        assert_eq!(format_coordinates(&Coordinates::new(0.0, 0.0)), "0.00°N, 0.00°E");
    }

    #[tokio::test]
    async fn fixed_location_without_coordinates_is_permission_denied() {
        let err = FixedLocation::default().locate().await.unwrap_err();
        assert!(matches!(err, WeatherError::PermissionDenied { .. }));
        assert_eq!(err.to_string(), "Location access needed");
    }

    #[tokio::test]
    async fn fixed_location_returns_coordinates() {
        let c = Coordinates::new(1.0, 2.0);
        assert_eq!(FixedLocation::new(Some(c)).locate().await.unwrap(), c);
    }
}
