use serde::Serialize;
use serde_json::Value;

/// The user-facing `error` text for every failure class. Constant on purpose:
/// only `details` (and the HTTP status) carries diagnostic signal.
pub const RELAY_ERROR_TEXT: &str = "I am tired, boss.";

/// A city-name lookup request. The city is taken raw from the request path;
/// trimming and non-emptiness checks happen on the frontend.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// A successful upstream response, carried verbatim.
///
/// The body stays a `serde_json::Value` rather than a typed struct: the relay
/// contract is to pass the upstream JSON through unchanged, and deserializing
/// into a fixed shape would silently drop fields the upstream adds.
#[derive(Debug, Clone)]
pub struct UpstreamWeather {
    /// Upstream HTTP status (always 2xx).
    pub status: u16,
    pub body: Value,
}

/// The normalized failure shape returned to the page.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub details: String,
}

impl ErrorEnvelope {
    /// Build an envelope with the fixed `error` text and the given details.
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            error: RELAY_ERROR_TEXT.to_string(),
            details: details.into(),
        }
    }
}
