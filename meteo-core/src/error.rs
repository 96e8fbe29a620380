use thiserror::Error;

/// Errors produced while talking to the Open-Meteo forecast endpoint.
///
/// Request parameters never produce an error: out-of-range values are coerced
/// by [`crate::validate`] instead.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to open connection to {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    #[error("Response body exceeds the {limit} byte buffer")]
    ResponseTooLarge { limit: usize },

    #[error("Open-Meteo returned HTTP {status}: {reason}")]
    Api { status: u16, reason: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownName { kind: &'static str, value: String },
}

impl WeatherError {
    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Api { status, .. } => Some(*status),
            WeatherError::RateLimitExceeded => Some(429),
            _ => None,
        }
    }
}
