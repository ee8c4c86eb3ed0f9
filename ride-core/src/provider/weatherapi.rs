use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    error::{WeatherError, truncate_detail},
    model::{Coordinates, ForecastRequest, WeatherForecast},
    normalize::normalize_str,
};

use super::ForecastProvider;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const LOGGED_BODY_CHARS: usize = 200;

/// WeatherAPI.com client for `forecast.json` and `search.json`.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let api_key = config.resolved_api_key().map_err(|e| WeatherError::Config(e.to_string()))?;
        Self::with_base_url(api_key, config.base_url())
    }

    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, "requesting WeatherAPI.com");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        read_body(res).await
    }
}

async fn read_body(res: Response) -> Result<String, WeatherError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        tracing::debug!(
            %status,
            body = %truncate_detail(&body, LOGGED_BODY_CHARS),
            "WeatherAPI.com returned an error"
        );
        return Err(WeatherError::http_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            body,
        ));
    }

    Ok(body)
}

#[derive(Debug, Deserialize)]
struct WaSearchResult {
    name: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl WaSearchResult {
    /// `"{name}, {region}"`, with country standing in for an empty region.
    fn display_name(&self) -> String {
        let region = self
            .region
            .as_deref()
            .filter(|r| !r.is_empty())
            .or(self.country.as_deref())
            .unwrap_or_default();

        if region.is_empty() { self.name.clone() } else { format!("{}, {region}", self.name) }
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    async fn get_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<Vec<WeatherForecast>, WeatherError> {
        let q = request.coordinates.as_query();
        let days = request.days.to_string();

        let body = self
            .get("forecast.json", &[("q", q.as_str()), ("days", days.as_str()), ("aqi", "no")])
            .await?;

        normalize_str(&body)
    }

    async fn place_name(&self, coordinates: &Coordinates) -> Result<Option<String>, WeatherError> {
        let q = coordinates.as_query();
        let body = self.get("search.json", &[("q", q.as_str())]).await?;

        let results: Vec<WaSearchResult> = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(format!("Invalid search response: {e}"), body))?;

        Ok(results.first().map(WaSearchResult::display_name))
    }
}
