use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of a failed call, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The call arguments were malformed; nothing was sent to the provider.
    InvalidArgument,
    /// Building the provider client or talking to the provider failed.
    Provider,
    /// Writing the report failed.
    Render,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("No API key configured for OpenWeatherMap.\nHint: export OWM_API_KEY=<your key>.")]
    MissingApiKey,

    #[error("Unit of measure '{0}' is not available. Use one of: c, f, k.")]
    UnitUnavailable(String),

    #[error("Language '{0}' is not supported by OpenWeatherMap.")]
    LangUnavailable(String),

    #[error("Failed to send request to OpenWeatherMap ({endpoint}): {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeatherMap {endpoint} request failed with status {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("Failed to parse OpenWeatherMap {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render weather report: {0}")]
    Render(#[from] std::fmt::Error),
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            WeatherError::Render(_) => ErrorKind::Render,
            WeatherError::MissingApiKey
            | WeatherError::UnitUnavailable(_)
            | WeatherError::LangUnavailable(_)
            | WeatherError::Request { .. }
            | WeatherError::Status { .. }
            | WeatherError::Decode { .. } => ErrorKind::Provider,
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
