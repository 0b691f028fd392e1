use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    config::{Config, Environment, SystemEnvironment},
    error::Result,
    model::{WeatherQuery, WeatherRequest},
    provider::{FORECAST_MAX_ENTRIES, OpenWeatherFactory, ProviderFactory},
    render::render_report,
};

/// Resolves a query, fetches current weather and the forecast, and renders the
/// report. Holds no per-call state; cloning is cheap.
#[derive(Debug, Clone)]
pub struct WeatherService {
    env: Arc<dyn Environment>,
    factory: Arc<dyn ProviderFactory>,
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new(Arc::new(SystemEnvironment), Arc::new(OpenWeatherFactory::default()))
    }
}

impl WeatherService {
    pub fn new(env: Arc<dyn Environment>, factory: Arc<dyn ProviderFactory>) -> Self {
        Self { env, factory }
    }

    /// Runs one call. The first failure ends the call; the forecast is only
    /// requested once current weather succeeded.
    pub async fn report(&self, query: WeatherQuery) -> Result<String> {
        let config = Config::from_env(self.env.as_ref());
        let request = WeatherRequest::resolve(query, &config);
        debug!(
            location = %request.location,
            units = %request.units,
            lang = %request.lang,
            "resolved weather request"
        );

        let provider = self.factory.create(&config)?;
        let current = provider.current_by_name(&request).await?;
        let forecast = provider
            .forecast_by_name(&request, FORECAST_MAX_ENTRIES)
            .await?;

        let report = render_report(&current, &forecast)?;
        info!(
            location = %request.location,
            forecast_entries = forecast.list.len(),
            "weather report rendered"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind, WeatherError,
        config::{ENV_API_KEY, ENV_LANG, test_env},
        model::{CurrentWeather, Forecast},
        provider::WeatherProvider,
        render::fixtures::{munich_current, munich_forecast},
    };
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// Records every request and replays canned responses.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<(&'static str, WeatherRequest)>>,
        max_entries: Mutex<Option<u32>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().iter().map(|(name, _)| *name).collect()
        }

        fn last_request(&self) -> WeatherRequest {
            self.calls.lock().unwrap().last().unwrap().1.clone()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Fail {
        Nothing,
        Current,
        Forecast,
    }

    #[derive(Debug)]
    struct FakeProvider {
        recorder: Arc<Recorder>,
        fail: Fail,
    }

    fn not_found(endpoint: &'static str) -> WeatherError {
        WeatherError::Status {
            endpoint,
            status: StatusCode::NOT_FOUND,
            message: "city not found".into(),
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_by_name(&self, request: &WeatherRequest) -> Result<CurrentWeather> {
            self.recorder.calls.lock().unwrap().push(("current", request.clone()));
            if self.fail == Fail::Current {
                return Err(not_found("current weather"));
            }
            Ok(munich_current())
        }

        async fn forecast_by_name(
            &self,
            request: &WeatherRequest,
            max_entries: u32,
        ) -> Result<Forecast> {
            self.recorder.calls.lock().unwrap().push(("forecast", request.clone()));
            *self.recorder.max_entries.lock().unwrap() = Some(max_entries);
            if self.fail == Fail::Forecast {
                return Err(not_found("5-day forecast"));
            }
            Ok(munich_forecast())
        }
    }

    #[derive(Debug)]
    struct FakeFactory {
        recorder: Arc<Recorder>,
        fail: Fail,
    }

    impl ProviderFactory for FakeFactory {
        fn create(&self, config: &Config) -> Result<Box<dyn WeatherProvider>> {
            config.api_key()?;
            Ok(Box::new(FakeProvider {
                recorder: self.recorder.clone(),
                fail: self.fail,
            }))
        }
    }

    fn service(pairs: &[(&str, &str)], fail: Fail) -> (WeatherService, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let factory = FakeFactory {
            recorder: recorder.clone(),
            fail,
        };
        (
            WeatherService::new(Arc::new(test_env(pairs)), Arc::new(factory)),
            recorder,
        )
    }

    #[tokio::test]
    async fn munich_report_contains_both_blocks_in_order() {
        let (svc, recorder) = service(&[(ENV_API_KEY, "KEY")], Fail::Nothing);

        let report = svc
            .report(WeatherQuery::new("Munich").with_units("c").with_lang("de"))
            .await
            .unwrap();

        let current_at = report.find("Current weather for Munich:").unwrap();
        let forecast_at = report.find("Weather Forecast for Munich:").unwrap();
        assert_eq!(current_at, 0);
        assert!(current_at < forecast_at);
        assert!(report[..forecast_at].contains("Regen"));
        assert_eq!(recorder.calls(), vec!["current", "forecast"]);
        assert_eq!(*recorder.max_entries.lock().unwrap(), Some(FORECAST_MAX_ENTRIES));
    }

    #[tokio::test]
    async fn current_failure_skips_forecast() {
        let (svc, recorder) = service(&[(ENV_API_KEY, "KEY")], Fail::Current);

        let err = svc.report(WeatherQuery::new("Atlantis")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Provider);
        assert!(err.to_string().contains("current weather"));
        assert_eq!(recorder.calls(), vec!["current"]);
    }

    #[tokio::test]
    async fn forecast_failure_discards_current_weather() {
        let (svc, recorder) = service(&[(ENV_API_KEY, "KEY")], Fail::Forecast);

        let err = svc.report(WeatherQuery::new("Munich")).await.unwrap_err();

        assert!(err.to_string().contains("5-day forecast"));
        assert_eq!(recorder.calls(), vec!["current", "forecast"]);
    }

    #[tokio::test]
    async fn missing_api_key_makes_no_requests() {
        let (svc, recorder) = service(&[], Fail::Nothing);

        let err = svc.report(WeatherQuery::new("Munich")).await.unwrap_err();

        assert!(matches!(err, WeatherError::MissingApiKey));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn omitted_options_use_environment_then_defaults() {
        let (svc, recorder) = service(&[(ENV_API_KEY, "KEY"), (ENV_LANG, "fr")], Fail::Nothing);

        svc.report(WeatherQuery::new("Paris")).await.unwrap();

        let request = recorder.last_request();
        assert_eq!(request.units, "c");
        assert_eq!(request.lang, "fr");
    }

    #[tokio::test]
    async fn empty_city_reaches_the_provider() {
        let (svc, recorder) = service(&[(ENV_API_KEY, "KEY")], Fail::Current);

        let err = svc.report(WeatherQuery::new("")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Provider);
        assert_eq!(recorder.last_request().location, "");
    }

    #[tokio::test]
    async fn repeated_calls_render_identically() {
        let (svc, _) = service(&[(ENV_API_KEY, "KEY")], Fail::Nothing);
        let query = WeatherQuery::new("Munich").with_lang("de");

        let first = svc.report(query.clone()).await.unwrap();
        let second = svc.report(query).await.unwrap();
        assert_eq!(first, second);
    }
}
