//! Timetable client error types.

use std::fmt;

/// Errors from the timetable HTTP client.
#[derive(Debug)]
pub enum TimetableError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// XML deserialization failed
    Xml {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Station lookup matched nothing
    StationNotFound(String),

    /// Rate limited by the API
    RateLimited,

    /// Invalid or missing bearer token
    Unauthorized,

    /// Client could not be set up from its configuration
    InvalidConfig(String),
}

impl TimetableError {
    /// Build an XML error, keeping a prefix of the offending body.
    pub(crate) fn xml(err: impl fmt::Display, body: &str) -> Self {
        TimetableError::Xml {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        TimetableError::InvalidConfig(message.into())
    }
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableError::Http(e) => write!(f, "HTTP error: {e}"),
            TimetableError::Xml { message, body } => {
                write!(f, "XML parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TimetableError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TimetableError::StationNotFound(query) => {
                write!(f, "did not find station for {query:?}")
            }
            TimetableError::RateLimited => write!(f, "rate limited by timetable API"),
            TimetableError::Unauthorized => write!(f, "unauthorized (invalid API token)"),
            TimetableError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for TimetableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimetableError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TimetableError {
    fn from(err: reqwest::Error) -> Self {
        TimetableError::Http(err)
    }
}
