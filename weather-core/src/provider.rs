use crate::{
    Config, WeatherRequest,
    error::Result,
    model::{CurrentWeather, Forecast},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Upper bound on forecast entries; large enough to return every 3-hour slot
/// of the 5-day forecast.
pub const FORECAST_MAX_ENTRIES: u32 = 99;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_name(&self, request: &WeatherRequest) -> Result<CurrentWeather>;

    async fn forecast_by_name(&self, request: &WeatherRequest, max_entries: u32)
    -> Result<Forecast>;
}

/// Builds a fresh provider for each call from the settings read for that call.
pub trait ProviderFactory: Send + Sync + Debug {
    fn create(&self, config: &Config) -> Result<Box<dyn WeatherProvider>>;
}

#[derive(Debug, Clone, Default)]
pub struct OpenWeatherFactory {
    base_url: Option<String>,
}

impl OpenWeatherFactory {
    /// Points every provider this factory builds at another API root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }
}

impl ProviderFactory for OpenWeatherFactory {
    fn create(&self, config: &Config) -> Result<Box<dyn WeatherProvider>> {
        let api_key = config.api_key()?;

        let provider = match &self.base_url {
            Some(base_url) => OpenWeatherProvider::with_base_url(api_key.to_owned(), base_url),
            None => OpenWeatherProvider::new(api_key.to_owned()),
        };

        Ok(Box::new(provider))
    }
}
