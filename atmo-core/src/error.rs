use thiserror::Error;

/// Failure of a single snapshot fetch.
///
/// The variants only differ in their message for UI purposes; callers show
/// `to_string()` and keep whatever snapshot they already had.
#[derive(Debug, Error)]
pub enum WeatherFetchError {
    /// Connection, DNS or timeout failure.
    #[error("Weather API Error: {0}")]
    Network(String),

    /// The provider answered with a non-2xx status.
    #[error("Weather API Error: request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// The body did not match the expected shape.
    #[error("Weather API Error: malformed response: {0}")]
    Parse(String),
}

impl WeatherFetchError {
    /// HTTP status code, for `Http` failures only.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherFetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherFetchError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            WeatherFetchError::Network(format!("could not connect: {err}"))
        } else {
            WeatherFetchError::Network(err.to_string())
        }
    }
}
