//! Cross-station train correlation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Optional sign, digits, dash, one digit.
static SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+-\d").expect("valid regex"));

/// Error returned when a trip id carries no correlation suffix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("trip id {id:?} has no correlation suffix")]
pub struct InvalidCorrelation {
    id: String,
}

/// The part of a trip id shared by every station's view of the same train.
///
/// Each station's timetable assigns its own trip id, but the ids embed a
/// common `<digits>-<digit>` fragment. Two trips at different stations are
/// the same physical train iff their correlation ids are equal.
///
/// # Examples
///
/// ```
/// use bahn_route::domain::CorrelationId;
///
/// let id = CorrelationId::from_trip_id("-1234-5").unwrap();
/// assert_eq!(id.as_str(), "-1234-5");
///
/// let id = CorrelationId::from_trip_id("1234-5").unwrap();
/// assert_eq!(id.as_str(), "1234-5");
///
/// assert!(CorrelationId::from_trip_id("abc").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Extract the correlation id from a raw trip id.
    ///
    /// Takes the leftmost match; later fragments are ignored.
    pub fn from_trip_id(id: &str) -> Result<Self, InvalidCorrelation> {
        SUFFIX
            .find(id)
            .map(|m| CorrelationId(m.as_str().to_string()))
            .ok_or_else(|| InvalidCorrelation { id: id.to_string() })
    }

    /// Returns the correlation id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CorrelationId({})", self.0)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A bare suffix extracts to itself
        #[test]
        fn bare_suffix_roundtrip(s in "-?[0-9]{1,19}-[0-9]") {
            let id = CorrelationId::from_trip_id(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Extraction is deterministic
        #[test]
        fn deterministic(s in ".*") {
            let a = CorrelationId::from_trip_id(&s);
            let b = CorrelationId::from_trip_id(&s);
            prop_assert_eq!(a, b);
        }

        /// Ids without any dash never correlate
        #[test]
        fn no_dash_rejected(s in "[^-]*") {
            prop_assert!(CorrelationId::from_trip_id(&s).is_err());
        }
    }
}
