use crate::model::{UpstreamWeather, WeatherQuery};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Failure classes for an upstream lookup.
///
/// `Upstream` is the only variant that surfaces upstream diagnostics to the
/// caller; every other variant is reported as a generic internal error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The upstream answered non-2xx with a structured `{message}` body
    /// (city not found, invalid key, rate limit).
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The request never completed: connect failure, read failure, etc.
    #[error("failed to reach upstream: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered 2xx but the body is not valid JSON.
    #[error("upstream returned a malformed body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The upstream answered non-2xx without a structured error body.
    #[error("upstream returned {status} without a structured error body")]
    UnexpectedBody { status: u16 },
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current weather for a city, metric units.
    async fn current_by_city(
        &self,
        query: &WeatherQuery,
    ) -> Result<UpstreamWeather, ProviderError>;
}
