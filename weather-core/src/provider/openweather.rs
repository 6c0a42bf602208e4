use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    Config,
    model::{UpstreamWeather, WeatherQuery},
};

use super::{ProviderError, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Structured error body OpenWeather returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Point the provider at an alternate base URL (mock upstream in tests).
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<UpstreamWeather, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        tracing::debug!(city, "requesting current weather from OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status.is_success() {
            let parsed: Value = serde_json::from_str(&body)?;
            return Ok(UpstreamWeather {
                status: status.as_u16(),
                body: parsed,
            });
        }

        match serde_json::from_str::<OwErrorBody>(&body) {
            Ok(err) => Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: err.message,
            }),
            Err(_) => {
                tracing::debug!(
                    status = status.as_u16(),
                    body = truncate_body(&body),
                    "upstream error body was not structured"
                );
                Err(ProviderError::UnexpectedBody {
                    status: status.as_u16(),
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(
        &self,
        query: &WeatherQuery,
    ) -> Result<UpstreamWeather, ProviderError> {
        self.fetch_current(&query.city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // The cut must land on a char boundary; upstream bodies are not
        // guaranteed to be ASCII.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        let config = Config {
            api_key: "test-key".to_string(),
        };
        OpenWeatherProvider::with_base_url(&config, server.uri())
    }

    #[tokio::test]
    async fn success_body_is_passed_through_with_all_fields() {
        let server = MockServer::start().await;
        let body = json!({
            "name": "Zakopane",
            "main": { "temp": 5.2, "humidity": 75 },
            "weather": [{ "main": "Clouds", "description": "scattered clouds" }],
            "visibility": 10000,
        });

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Zakopane"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let result = provider
            .current_by_city(&WeatherQuery::new("Zakopane"))
            .await
            .unwrap();

        assert_eq!(result.status, 200);
        // Every field survives, including ones the frontend never reads.
        assert_eq!(result.body, body);
    }

    #[tokio::test]
    async fn structured_upstream_error_keeps_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .current_by_city(&WeatherQuery::new("Enapokaz"))
            .await
            .unwrap_err();

        match err {
            ProviderError::Upstream { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("expected Upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .current_by_city(&WeatherQuery::new("Zakopane"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[tokio::test]
    async fn unstructured_error_body_is_not_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .current_by_city(&WeatherQuery::new("Zakopane"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::UnexpectedBody { status: 502 }));
    }

    #[test]
    fn truncate_body_never_splits_a_multibyte_char() {
        let mut body = "a".repeat(199);
        body.push('é');
        body.push_str(&"b".repeat(50));

        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        // The 'é' straddles the limit and must be dropped whole.
        assert_eq!(truncated, format!("{}...", "a".repeat(199)));

        let ascii = "x".repeat(300);
        assert_eq!(truncate_body(&ascii), format!("{}...", "x".repeat(200)));

        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error() {
        // A pooled server from `MockServer::start()` stays alive after drop;
        // a builder-created server is dedicated and shuts down with the handle.
        let server = MockServer::builder().start().await;
        let uri = server.uri();
        drop(server);

        let config = Config {
            api_key: "test-key".to_string(),
        };
        let provider = OpenWeatherProvider::with_base_url(&config, uri);
        let err = provider
            .current_by_city(&WeatherQuery::new("Zakopane"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
