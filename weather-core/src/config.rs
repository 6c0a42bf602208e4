use std::env;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Process-wide configuration, constructed once at startup and passed
/// explicitly to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API key for the upstream weather provider.
    pub api_key: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// A missing `WEATHER_API_KEY` is not an error here: the key is carried
    /// through empty and the upstream request fails with 401 instead.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_VAR).unwrap_or_default(),
        }
    }
}
