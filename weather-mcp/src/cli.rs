use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use weather_core::{WeatherQuery, WeatherService};

use crate::server::WeatherServer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-mcp",
    version,
    about = "MCP server for current and forecast weather (OpenWeatherMap)"
)]
pub struct Cli {
    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the `weather` tool over stdio.
    Serve,

    /// Print the weather report for a city once and exit.
    Show {
        /// City name, e.g. "Munich" or "New York".
        city: String,

        /// Temperature units (c|f|k); falls back to OWM_UNITS, then "c".
        #[arg(long)]
        units: Option<String>,

        /// Language code; falls back to OWM_LANG, then "en".
        #[arg(long)]
        lang: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let service = WeatherService::default();

        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => {
                info!("Starting weather MCP server on stdio");
                let running = WeatherServer::new(service).serve(stdio()).await?;
                running.waiting().await?;
                info!("Weather MCP server stopped");
            }
            Command::Show { city, units, lang } => {
                let query = WeatherQuery {
                    city,
                    units,
                    lang,
                };
                let report = service.report(query).await?;
                print!("{report}");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["weather-mcp"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["weather-mcp", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn show_parses_city_and_options() {
        let cli =
            Cli::try_parse_from(["weather-mcp", "show", "New York", "--units", "f", "--lang", "en"])
                .unwrap();

        match cli.command {
            Some(Command::Show { city, units, lang }) => {
                assert_eq!(city, "New York");
                assert_eq!(units.as_deref(), Some("f"));
                assert_eq!(lang.as_deref(), Some("en"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["weather-mcp", "show"]).is_err());
    }
}
