//! Station types.

use std::fmt;

use serde::Serialize;

/// Error returned when an EVA number is not usable as a station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid EVA number: {reason}")]
pub struct InvalidEva {
    reason: &'static str,
}

/// A station's EVA number, the upstream numeric station identifier.
///
/// The timetable service reports `eva="0"` when a lookup matched nothing,
/// so zero is rejected here and any `Eva` value names a real station.
///
/// # Examples
///
/// ```
/// use bahn_route::domain::Eva;
///
/// let hbf = Eva::new(8000105).unwrap();
/// assert_eq!(hbf.get(), 8000105);
/// assert_eq!(hbf.to_string(), "8000105");
///
/// assert!(Eva::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Eva(u64);

impl Eva {
    /// Create an EVA number, rejecting the "not found" sentinel.
    pub fn new(value: u64) -> Result<Self, InvalidEva> {
        if value == 0 {
            return Err(InvalidEva {
                reason: "zero means no station was found",
            });
        }
        Ok(Eva(value))
    }

    /// Returns the raw number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Eva {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Eva({})", self.0)
    }
}

impl fmt::Display for Eva {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station as returned by the station lookup.
///
/// Identity is the EVA number. The name is what the timetable service calls
/// the station, and is also the fragment searched for in trip paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    /// Human-readable station name
    pub name: String,
    /// Upstream station id
    pub eva: Eva,
}

impl Station {
    /// Creates a station.
    pub fn new(name: impl Into<String>, eva: Eva) -> Self {
        Self {
            name: name.into(),
            eva,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
