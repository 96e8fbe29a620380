use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    ClientConfig, ForecastResponse, RequestParameters, WeatherError,
    query::to_query,
    transport::{HttpTransport, RawResponse, Transport},
    validate::validate,
};

/// Path of the forecast endpoint on the API host.
pub const FORECAST_PATH: &str = "/v1/forecast";

/// Error body Open-Meteo sends instead of a flatbuffers payload.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: String,
}

#[derive(Debug)]
pub struct OpenMeteoClient<T: Transport = HttpTransport> {
    transport: T,
    api_key: Option<String>,
}

impl OpenMeteoClient<HttpTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self, WeatherError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(transport, config.api_key()))
    }
}

impl<T: Transport> OpenMeteoClient<T> {
    pub fn with_transport(transport: T, api_key: Option<&str>) -> Self {
        Self {
            transport,
            api_key: api_key.map(str::to_owned),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate `params` in place and return the query string it renders to.
    pub fn prepare(&self, params: &mut RequestParameters) -> String {
        validate(params);
        to_query(params, self.api_key.as_deref())
    }

    /// Full request URL for `params`, after validation.
    pub fn forecast_url(&self, params: &mut RequestParameters) -> String {
        let query = self.prepare(params);
        format!("{}{FORECAST_PATH}{query}", self.transport.base_url())
    }

    /// Validate `params`, request a forecast and take ownership of the body.
    ///
    /// `params` is modified: illegal variables become `Undefined`, day counts
    /// are clamped and time ranges are completed and ordered.
    #[instrument(skip_all, fields(lat = %params.latitude, lon = %params.longitude))]
    pub async fn fetch_weather(
        &self,
        params: &mut RequestParameters,
    ) -> Result<ForecastResponse, WeatherError> {
        let query = self.prepare(params);
        let RawResponse { status, body } = self.transport.get(FORECAST_PATH, &query).await?;

        if status == 429 {
            warn!("rate limited by Open-Meteo");
            return Err(WeatherError::RateLimitExceeded);
        }
        if !(200..300).contains(&status) {
            let reason = serde_json::from_slice::<ApiErrorBody>(&body)
                .map(|b| b.reason)
                .unwrap_or_else(|_| truncate_body(&String::from_utf8_lossy(&body)));
            warn!(status, %reason, "forecast request rejected");
            return Err(WeatherError::Api { status, reason });
        }

        let response = ForecastResponse::new(status, body)?;
        info!(status, messages = response.len(), "forecast received");
        Ok(response)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Granularity, WeatherVariable};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FakeTransport {
        status: u16,
        body: Bytes,
        requests: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn answering(status: u16, body: &'static [u8]) -> Self {
            Self {
                status,
                body: Bytes::from_static(body),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        fn base_url(&self) -> &str {
            "https://api.open-meteo.com"
        }

        async fn get(&self, path: &str, query: &str) -> Result<RawResponse, WeatherError> {
            self.requests.lock().unwrap().push(format!("{path}{query}"));
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    const ONE_MESSAGE: &[u8] = &[3, 0, 0, 0, b'a', b'b', b'c'];

    #[tokio::test]
    async fn fetch_validates_then_requests_the_forecast_path() {
        let client = OpenMeteoClient::with_transport(FakeTransport::answering(200, ONE_MESSAGE), None);
        let mut params = RequestParameters::new(52.52, 13.41).with_variables(
            Granularity::Current,
            [WeatherVariable::Temperature2m, WeatherVariable::Sunset],
        );
        params.forecast_days = 40;

        let response = client.fetch_weather(&mut params).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.len(), 1);
        assert_eq!(params.current[1], WeatherVariable::Undefined);
        assert_eq!(params.forecast_days, 16);

        let requests = client.transport().requests.lock().unwrap();
        assert_eq!(
            requests.as_slice(),
            ["/v1/forecast?latitude=52.52&longitude=13.41&format=flatbuffers\
              &current=temperature_2m&forecast_days=16"]
        );
    }

    #[tokio::test]
    async fn api_key_is_forwarded() {
        let client =
            OpenMeteoClient::with_transport(FakeTransport::answering(200, ONE_MESSAGE), Some("k1"));
        let mut params = RequestParameters::new(1.0, 2.0);

        client.fetch_weather(&mut params).await.unwrap();

        let requests = client.transport().requests.lock().unwrap();
        assert!(requests[0].ends_with("&format=flatbuffers&apikey=k1"));
    }

    #[tokio::test]
    async fn error_body_reason_is_surfaced() {
        let body = br#"{"error":true,"reason":"Cannot initialize WeatherVariable from invalid String value"}"#;
        let client = OpenMeteoClient::with_transport(FakeTransport::answering(400, body), None);

        let err = client
            .fetch_weather(&mut RequestParameters::new(0.0, 0.0))
            .await
            .unwrap_err();

        match err {
            WeatherError::Api { status, reason } => {
                assert_eq!(status, 400);
                assert!(reason.starts_with("Cannot initialize"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn rate_limit_maps_to_its_own_error() {
        let client = OpenMeteoClient::with_transport(FakeTransport::answering(429, b"slow down"), None);

        let err = client
            .fetch_weather(&mut RequestParameters::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_text() {
        let client = OpenMeteoClient::with_transport(FakeTransport::answering(502, b"Bad Gateway"), None);

        let err = client
            .fetch_weather(&mut RequestParameters::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_rejected() {
        let client = OpenMeteoClient::with_transport(FakeTransport::answering(200, &[9, 0, 0, 0, 1]), None);

        let err = client
            .fetch_weather(&mut RequestParameters::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::MalformedEnvelope(_)));
    }

    #[test]
    fn forecast_url_joins_host_path_and_query() {
        let client = OpenMeteoClient::with_transport(FakeTransport::answering(200, ONE_MESSAGE), None);
        let mut params = RequestParameters::new(10.0, 20.5);

        assert_eq!(
            client.forecast_url(&mut params),
            "https://api.open-meteo.com/v1/forecast?latitude=10&longitude=20.5&format=flatbuffers"
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);
        assert_eq!(short.len(), 203);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }
}
