use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    model::{CurrentWeather, Forecast, Units, WeatherRequest},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const CURRENT_ENDPOINT: &str = "current weather";
const FORECAST_ENDPOINT: &str = "5-day forecast";

/// Language codes accepted by the OpenWeatherMap `lang` parameter.
const LANG_CODES: &[&str] = &[
    "af", "al", "ar", "az", "bg", "ca", "cz", "da", "de", "el", "en", "eu", "fa", "fi", "fr", "gl",
    "he", "hi", "hr", "hu", "id", "it", "ja", "kr", "la", "lt", "mk", "no", "nl", "pl", "pt",
    "pt_br", "ro", "ru", "sv", "se", "sk", "sl", "sp", "es", "sr", "th", "tr", "ua", "uk", "vi",
    "zh_cn", "zh_tw", "zu",
];

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            http: Client::new(),
        }
    }

    /// Validates the unit and language codes and builds the shared query
    /// parameters. Fails before anything is sent when a code is unsupported.
    fn query_params(&self, request: &WeatherRequest) -> Result<(Units, Vec<(&'static str, String)>)> {
        let units = Units::parse(&request.units)
            .ok_or_else(|| WeatherError::UnitUnavailable(request.units.clone()))?;
        let lang = validate_lang(&request.lang)?;

        let params = vec![
            ("q", request.location.clone()),
            ("units", units.api_value().to_owned()),
            ("lang", lang),
            ("appid", self.api_key.clone()),
        ];

        Ok((units, params))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| WeatherError::Request {
                endpoint,
                source: source.without_url(),
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request {
                endpoint,
                source: source.without_url(),
            })?;

        debug!(%url, %status, bytes = body.len(), "OpenWeatherMap {endpoint} response");

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status,
                message: error_message(&body),
            });
        }

        decode(endpoint, &body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_name(&self, request: &WeatherRequest) -> Result<CurrentWeather> {
        let (units, params) = self.query_params(request)?;
        debug!(location = %request.location, units = units.api_value(), "requesting current weather");

        let mut current: CurrentWeather = self.fetch(CURRENT_ENDPOINT, "weather", &params).await?;
        current.units = units;
        Ok(current)
    }

    async fn forecast_by_name(&self, request: &WeatherRequest, max_entries: u32) -> Result<Forecast> {
        let (units, mut params) = self.query_params(request)?;
        params.push(("cnt", max_entries.to_string()));
        debug!(location = %request.location, units = units.api_value(), max_entries, "requesting forecast");

        let mut forecast: Forecast = self.fetch(FORECAST_ENDPOINT, "forecast", &params).await?;
        forecast.units = units;
        Ok(forecast)
    }
}

fn validate_lang(lang: &str) -> Result<String> {
    let lower = lang.to_lowercase();
    if LANG_CODES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(WeatherError::LangUnavailable(lang.to_owned()))
    }
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| WeatherError::Decode { endpoint, source })
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

/// OpenWeatherMap reports failures as `{"cod": .., "message": ..}`; fall back
/// to the raw body for anything else.
fn error_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
