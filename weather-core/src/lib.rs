//! Core library for the weather relay service.
//!
//! This crate defines:
//! - Configuration loaded from the environment
//! - Abstraction over the upstream weather provider
//! - Shared domain models (query, pass-through payload, error envelope)
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod model;
pub mod provider;

pub use config::Config;
pub use model::{ErrorEnvelope, RELAY_ERROR_TEXT, UpstreamWeather, WeatherQuery};
pub use provider::{ProviderError, WeatherProvider};
