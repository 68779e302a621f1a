//! Route resolution errors.

use crate::domain::TimeError;
use crate::timetable::TimetableError;

/// Error from resolving a leg or an itinerary.
///
/// Every variant is fatal: the first one raised aborts the whole itinerary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// The timetable service could not be reached or refused the request
    #[error("transport error: {0}")]
    Transport(String),

    /// A response or scheduled time could not be parsed
    #[error("malformed timetable data: {0}")]
    Format(String),

    /// The station lookup matched nothing
    #[error("did not find station for {0:?}")]
    StationNotFound(String),

    /// No train from `from` towards `to` within the search window
    #[error("could not find route from {from} to {to}")]
    RouteNotFound { from: String, to: String },
}

impl From<TimetableError> for PlanError {
    fn from(err: TimetableError) -> Self {
        match err {
            TimetableError::Xml { .. } => PlanError::Format(err.to_string()),
            TimetableError::StationNotFound(query) => PlanError::StationNotFound(query),
            other => PlanError::Transport(other.to_string()),
        }
    }
}

impl From<TimeError> for PlanError {
    fn from(err: TimeError) -> Self {
        PlanError::Format(err.to_string())
    }
}
