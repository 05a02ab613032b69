use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("API responded with status: {0}")]
    Status(u16),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = Error::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "Request timed out after 3000ms");
    }

    #[test]
    fn test_url_parse_error_is_invalid_url() {
        let err: Error = url::Url::parse("::").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert_eq!(Error::Status(502).to_string(), "API responded with status: 502");
    }
}
