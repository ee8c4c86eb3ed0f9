use thiserror::Error;

pub const CODE_INVALID_RESPONSE: &str = "INVALID_RESPONSE";
pub const CODE_FETCH_ERROR: &str = "FETCH_ERROR";
pub const CODE_PERMISSION_DENIED: &str = "PERMISSION_DENIED";
pub const CODE_CONFIG: &str = "CONFIG_ERROR";

/// Failures surfaced by the collaborators around the riding core.
///
/// Score, classification and recommendation functions are total and never
/// produce these.
#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    /// Transport failure or non-success HTTP status from the provider.
    #[error("{message}")]
    NetworkFailure { message: String, code: String, detail: Option<String> },

    /// Payload is missing the expected forecast structure.
    #[error("{message}")]
    MalformedResponse { message: String, code: String, payload: String },

    /// Location access is unavailable.
    #[error("{message}")]
    PermissionDenied { message: String, detail: Option<String> },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    pub fn malformed(message: impl Into<String>, payload: impl Into<String>) -> Self {
        WeatherError::MalformedResponse {
            message: message.into(),
            code: CODE_INVALID_RESPONSE.to_string(),
            payload: payload.into(),
        }
    }

    pub fn fetch(message: impl Into<String>, detail: impl Into<String>) -> Self {
        WeatherError::NetworkFailure {
            message: message.into(),
            code: CODE_FETCH_ERROR.to_string(),
            detail: Some(detail.into()),
        }
    }

    pub fn http_status(status: u16, reason: &str, body: impl Into<String>) -> Self {
        WeatherError::NetworkFailure {
            message: format!("Weather API error: {status} - {reason}"),
            code: status.to_string(),
            detail: Some(body.into()),
        }
    }

    /// Machine-readable code.
    pub fn code(&self) -> &str {
        match self {
            WeatherError::NetworkFailure { code, .. } => code,
            WeatherError::MalformedResponse { code, .. } => code,
            WeatherError::PermissionDenied { .. } => CODE_PERMISSION_DENIED,
            WeatherError::Config(_) => CODE_CONFIG,
        }
    }

    /// Diagnostic text shown under the message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            WeatherError::NetworkFailure { detail, .. } => detail.as_deref(),
            WeatherError::MalformedResponse { payload, .. } => Some(payload),
            WeatherError::PermissionDenied { detail, .. } => detail.as_deref(),
            WeatherError::Config(_) => None,
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate_detail(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::fetch(format!("Failed to fetch weather data: {err}"), err.to_string())
    }
}
