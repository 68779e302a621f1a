//! Timetable HTTP client.
//!
//! Provides async methods for querying the timetable API. Handles bearer
//! authentication, status mapping, and conversion to domain types.

use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::{Eva, HourSlice, Station, Trip};

use super::convert::{parse_station, parse_timetable};
use super::error::TimetableError;
use super::request::RequestPath;

/// Default base URL for the timetable API.
pub const DEFAULT_BASE_URL: &str = "https://api.deutschebahn.com/timetables/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the timetable client.
#[derive(Clone)]
pub struct TimetableConfig {
    /// Bearer token for authentication
    pub token: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TimetableConfig {
    /// Create a new config with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for TimetableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimetableConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Timetable API client.
///
/// Every method performs a network request; see
/// [`CachedTimetableClient`](crate::cache::CachedTimetableClient) for the
/// cached variant used by the planner.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TimetableClient {
    /// Create a new timetable client with the given configuration.
    pub fn new(config: TimetableConfig) -> Result<Self, TimetableError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| TimetableError::config("invalid API token format"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TimetableError::InvalidConfig(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TimetableError::InvalidConfig(format!(
                "base URL {:?} cannot have path segments",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Full URL for a request path. Segments are percent-encoded.
    pub fn url_for(&self, path: &RequestPath) -> Result<Url, TimetableError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TimetableError::config("base URL cannot be a base"))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }

    /// Fetch the raw response body for a request path.
    pub async fn fetch(&self, path: &RequestPath) -> Result<String, TimetableError> {
        let url = self.url_for(path)?;
        debug!(%path, "Fetching from timetable API");

        let response = self.http.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TimetableError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TimetableError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TimetableError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    /// Look up a station by name, bypassing any cache.
    pub async fn get_station(&self, query: &str) -> Result<Station, TimetableError> {
        let body = self.fetch(&RequestPath::station(query)).await?;
        parse_station(&body, query)
    }

    /// Get one hour of a station's timetable, bypassing any cache.
    pub async fn get_timetable(
        &self,
        eva: Eva,
        slice: HourSlice,
    ) -> Result<Vec<Trip>, TimetableError> {
        let body = self.fetch(&RequestPath::plan(eva, slice)).await?;
        parse_timetable(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TimetableConfig::new("test-token")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.token, "test-token");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = TimetableConfig::new("test-token");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_debug_hides_token() {
        let config = TimetableConfig::new("secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn client_creation() {
        let client = TimetableClient::new(TimetableConfig::new("test-token"));
        assert!(client.is_ok());
    }

    #[test]
    fn reject_token_with_newline() {
        let client = TimetableClient::new(TimetableConfig::new("abc\ndef"));
        assert!(matches!(client, Err(TimetableError::InvalidConfig(_))));
    }

    #[test]
    fn reject_bad_base_url() {
        let config = TimetableConfig::new("t").with_base_url("not a url");
        assert!(matches!(
            TimetableClient::new(config),
            Err(TimetableError::InvalidConfig(_))
        ));

        let config = TimetableConfig::new("t").with_base_url("mailto:someone@example.com");
        assert!(matches!(
            TimetableClient::new(config),
            Err(TimetableError::InvalidConfig(_))
        ));
    }

    #[test]
    fn url_for_appends_segments() {
        let client = TimetableClient::new(TimetableConfig::new("t")).unwrap();
        let url = client.url_for(&RequestPath::station("Hbf")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.deutschebahn.com/timetables/v1/station/Hbf"
        );
    }

    #[test]
    fn url_for_handles_trailing_slash_and_encoding() {
        let config = TimetableConfig::new("t").with_base_url("http://localhost:8080/");
        let client = TimetableClient::new(config).unwrap();
        let url = client
            .url_for(&RequestPath::station("Köln Hbf/tief"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/station/K%C3%B6ln%20Hbf%2Ftief"
        );
    }
}
