//! Core library for the `weather` MCP server.
//!
//! This crate defines:
//! - Call arguments and their resolution against environment defaults
//! - An OpenWeatherMap client behind the `WeatherProvider` abstraction
//! - The fixed text templates for the weather report
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod service;

pub use config::{Config, Environment, SystemEnvironment};
pub use error::{ErrorKind, WeatherError};
pub use model::{CurrentWeather, Forecast, Units, WeatherQuery, WeatherRequest};
pub use provider::{OpenWeatherFactory, ProviderFactory, WeatherProvider};
pub use service::WeatherService;
