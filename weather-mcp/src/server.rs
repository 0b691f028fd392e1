use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Deserializer, de};
use serde_json::{Map, Value};
use weather_core::{ErrorKind, WeatherError, WeatherQuery, WeatherService};

/// Arguments of the `weather` tool.
///
/// The schema is derived from the fields; deserialization goes through
/// [`WeatherQuery::from_arguments`] so a missing or non-string `city` is
/// reported as "city must be a string".
#[derive(Debug, Clone, PartialEq, Eq, schemars::JsonSchema)]
pub struct WeatherParams {
    /// Location to get weather. If location has a space, wrap the location in double quotes.
    pub city: String,
    /// Temperature units (celsius|fahrenheit|kelvin) - default: c
    #[schemars(extend("default" = "c"))]
    pub units: Option<String>,
    /// Language for weather descriptions - default: en
    #[schemars(extend("default" = "en"))]
    pub lang: Option<String>,
}

impl<'de> Deserialize<'de> for WeatherParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let args = Map::<String, Value>::deserialize(deserializer)?;
        let query = WeatherQuery::from_arguments(&args).map_err(de::Error::custom)?;

        Ok(Self {
            city: query.city,
            units: query.units,
            lang: query.lang,
        })
    }
}

impl From<WeatherParams> for WeatherQuery {
    fn from(params: WeatherParams) -> Self {
        WeatherQuery {
            city: params.city,
            units: params.units,
            lang: params.lang,
        }
    }
}

#[derive(Clone)]
pub struct WeatherServer {
    service: WeatherService,
    tool_router: ToolRouter<WeatherServer>,
}

#[tool_router]
impl WeatherServer {
    pub fn new(service: WeatherService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "weather",
        description = "Get current and forecast weather information for a specific City"
    )]
    async fn weather(
        &self,
        Parameters(params): Parameters<WeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.service.report(params.into()).await.map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(report)]))
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Use the `weather` tool to get the current conditions and the 5-day forecast for a city."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

fn to_mcp_error(err: WeatherError) -> McpError {
    match err.kind() {
        ErrorKind::InvalidArgument => McpError::invalid_params(err.to_string(), None),
        ErrorKind::Provider | ErrorKind::Render => McpError::internal_error(err.to_string(), None),
    }
}
