use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    config::{Config, non_empty},
    error::{Result, WeatherError},
};

/// Arguments of one `weather` call, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub units: Option<String>,
    pub lang: Option<String>,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Extracts a query from a loosely typed argument object.
    ///
    /// `city` must be a JSON string (an empty one is fine). `units` and `lang`
    /// are taken only when they are strings; anything else counts as absent.
    pub fn from_arguments(args: &Map<String, Value>) -> Result<Self> {
        let city = match args.get("city") {
            Some(Value::String(city)) => city.clone(),
            _ => return Err(WeatherError::InvalidArgument("city must be a string".into())),
        };
        let optional = |key: &str| args.get(key).and_then(Value::as_str).map(str::to_owned);

        Ok(Self {
            city,
            units: optional("units"),
            lang: optional("lang"),
        })
    }
}

/// Fully defaulted parameters handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub location: String,
    pub units: String,
    pub lang: String,
}

impl WeatherRequest {
    /// Argument first, then environment, then the built-in default.
    pub fn resolve(query: WeatherQuery, config: &Config) -> Self {
        let units = non_empty(query.units).unwrap_or_else(|| config.units_or_default().to_owned());
        let lang = non_empty(query.lang).unwrap_or_else(|| config.lang_or_default().to_owned());

        Self {
            location: query.city,
            units,
            lang,
        }
    }
}

/// Unit system understood by OpenWeatherMap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Units {
    Celsius,
    Fahrenheit,
    #[default]
    Kelvin,
}

impl Units {
    /// Parses a unit code, ignoring case. Accepts the short codes as well as
    /// the scale and OpenWeatherMap system names.
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "c" | "celsius" | "metric" => Some(Units::Celsius),
            "f" | "fahrenheit" | "imperial" => Some(Units::Fahrenheit),
            "k" | "kelvin" | "standard" => Some(Units::Kelvin),
            _ => None,
        }
    }

    /// Value of the `units` query parameter.
    pub fn api_value(&self) -> &'static str {
        match self {
            Units::Celsius => "metric",
            Units::Fahrenheit => "imperial",
            Units::Kelvin => "standard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Units::Celsius => "°C",
            Units::Fahrenheit => "°F",
            Units::Kelvin => "K",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Readings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sun {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// Current conditions for one location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: Readings,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub sys: Sun,
    /// Unit system the readings are expressed in; set by the provider.
    #[serde(skip)]
    pub units: Units,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// One 3-hour slot of the 5-day forecast.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: String,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Forecast {
    pub city: ForecastCity,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(skip)]
    pub units: Units,
}
