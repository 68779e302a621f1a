//! Request paths for the timetable service.

use std::fmt;

use crate::domain::{Eva, HourSlice};

/// A request path below the service's base URL.
///
/// The same path names the request on the wire and the response in the
/// disk cache.
///
/// # Examples
///
/// ```
/// use bahn_route::timetable::RequestPath;
///
/// let path = RequestPath::station("Hbf");
/// assert_eq!(path.to_string(), "/station/Hbf");
/// assert_eq!(path.segments(), ["station", "Hbf"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestPath {
    segments: Vec<String>,
}

impl RequestPath {
    /// Station lookup: `/station/<query>`.
    pub fn station(query: &str) -> Self {
        Self {
            segments: vec!["station".to_string(), query.to_string()],
        }
    }

    /// One hour of a station's timetable: `/plan/<eva>/<YYMMDD>/<HH>`.
    pub fn plan(eva: Eva, slice: HourSlice) -> Self {
        Self {
            segments: vec![
                "plan".to_string(),
                eva.to_string(),
                slice.date_segment(),
                slice.hour_segment(),
            ],
        }
    }

    /// The path segments, unencoded.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
