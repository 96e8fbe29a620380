use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, error};

use crate::{ClientConfig, WeatherError};

/// Status line and body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Performs a single GET against the forecast host.
///
/// One attempt per call; retries and caching belong to the caller.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    fn base_url(&self) -> &str;

    async fn get(&self, path: &str, query: &str) -> Result<RawResponse, WeatherError>;
}

/// reqwest transport over rustls, trusting the bundled webpki root certificates.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    max_response_bytes: usize,
    http: Client,
}

impl HttpTransport {
    pub fn from_config(config: &ClientConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed {
                host: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_response_bytes: config.max_response_bytes,
            http,
        })
    }

    /// Read at most `max_response_bytes`. A success body past the limit is an
    /// error; an error body is cut at the limit so its status survives.
    async fn read_body(&self, mut res: reqwest::Response) -> Result<Bytes, WeatherError> {
        let truncate = !res.status().is_success();
        let mut buf = BytesMut::new();

        while let Some(chunk) = res
            .chunk()
            .await
            .map_err(|e| WeatherError::BodyRead(e.to_string()))?
        {
            let room = self.max_response_bytes - buf.len();
            if chunk.len() > room {
                if !truncate {
                    return Err(WeatherError::ResponseTooLarge {
                        limit: self.max_response_bytes,
                    });
                }
                buf.extend_from_slice(&chunk[..room]);
                break;
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(buf.freeze())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &str) -> Result<RawResponse, WeatherError> {
        let url = format!("{}{path}{query}", self.base_url);
        debug!(%url, "GET");

        let res = self.http.get(&url).send().await.map_err(|e| {
            error!(error = %e, "Failed to open HTTP connection");
            if e.is_connect() {
                WeatherError::ConnectionFailed {
                    host: self.base_url.clone(),
                    reason: e.to_string(),
                }
            } else {
                WeatherError::RequestFailed(e.to_string())
            }
        })?;

        let status = res.status().as_u16();
        let body = self.read_body(res).await.inspect_err(|e| {
            error!(status, error = %e, "Failed to read response body");
        })?;

        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let cfg = ClientConfig {
            base_url: "https://api.open-meteo.com/".into(),
            ..ClientConfig::default()
        };
        let transport = HttpTransport::from_config(&cfg).expect("client should build");
        assert_eq!(transport.base_url(), "https://api.open-meteo.com");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_connection_error() {
        let cfg = ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..ClientConfig::default()
        };
        let transport = HttpTransport::from_config(&cfg).unwrap();

        let err = transport.get("/v1/forecast", "?latitude=0&longitude=0").await.unwrap_err();
        assert!(
            matches!(err, WeatherError::ConnectionFailed { .. } | WeatherError::RequestFailed(_)),
            "unexpected error: {err}"
        );
        assert_eq!(err.status(), None);
    }
}
