//! Timetable trip types.
//!
//! A `Trip` is one train's entry in one station's hourly timetable. The same
//! physical train appears as a different `Trip` in each station's timetable;
//! the `CorrelationId` ties them together.

use chrono::{DateTime, Local};

use super::{CorrelationId, TimeError, parse_scheduled};

/// Which side of a station call to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The train leaving the station
    Departure,
    /// The train reaching the station
    Arrival,
}

/// One side of a trip's call at a station, verbatim from the timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripEvent {
    /// Scheduled time in compact `YYMMDDHHmm` form (unparsed)
    pub scheduled: String,
    /// Pipe-separated station names: the stations still to come for a
    /// departure, or the stations already visited for an arrival
    pub path: String,
    /// Line label, e.g. "7" for an RE 7 (may be empty)
    pub line: String,
}

impl TripEvent {
    /// Creates a trip event.
    pub fn new(
        scheduled: impl Into<String>,
        path: impl Into<String>,
        line: impl Into<String>,
    ) -> Self {
        Self {
            scheduled: scheduled.into(),
            path: path.into(),
            line: line.into(),
        }
    }

    /// Parse the scheduled time.
    pub fn scheduled_time(&self) -> Result<DateTime<Local>, TimeError> {
        parse_scheduled(&self.scheduled)
    }

    /// Whether the path mentions the given station-name fragment.
    ///
    /// Case-sensitive, unanchored substring match.
    pub fn passes(&self, fragment: &str) -> bool {
        self.path.contains(fragment)
    }
}

/// The trip label (`tl`) element of a timetable entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInfo {
    /// Filter flags (`f`)
    pub flags: String,
    /// Trip type (`t`)
    pub trip_type: String,
    /// Owner (`o`)
    pub owner: String,
    /// Category code (`c`), e.g. "ICE", "RE", "S"
    pub category: String,
    /// Train number (`n`)
    pub number: String,
}

/// A train's entry in one station's hourly timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    /// Station-specific trip id
    pub id: String,
    /// Cross-station join key derived from `id`
    pub correlation: CorrelationId,
    /// Trip label
    pub line_info: LineInfo,
    /// Departure from this station (absent if the train terminates here)
    pub departure: Option<TripEvent>,
    /// Arrival at this station (absent if the train starts here)
    pub arrival: Option<TripEvent>,
}

impl Trip {
    /// Returns the event for the given direction, if the trip has one.
    pub fn event(&self, direction: Direction) -> Option<&TripEvent> {
        match direction {
            Direction::Departure => self.departure.as_ref(),
            Direction::Arrival => self.arrival.as_ref(),
        }
    }

    /// Display label for the line: category code followed by the
    /// departure's line string, e.g. "RE" + "7".
    pub fn line_label(&self) -> String {
        let line = self.departure.as_ref().map_or("", |d| d.line.as_str());
        format!("{}{}", self.line_info.category, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(departure: Option<TripEvent>, arrival: Option<TripEvent>) -> Trip {
        Trip {
            id: "-77-2-2403150905-1".to_string(),
            correlation: CorrelationId::from_trip_id("-77-2").unwrap(),
            line_info: LineInfo {
                category: "RE".to_string(),
                ..LineInfo::default()
            },
            departure,
            arrival,
        }
    }

    #[test]
    fn event_by_direction() {
        let dep = TripEvent::new("2403150905", "B|C", "7");
        let t = trip(Some(dep.clone()), None);
        assert_eq!(t.event(Direction::Departure), Some(&dep));
        assert_eq!(t.event(Direction::Arrival), None);
    }

    #[test]
    fn passes_is_case_sensitive_substring() {
        let ev = TripEvent::new("2403150905", "Köln Hbf|Düsseldorf Hbf|Essen", "");
        assert!(ev.passes("Hbf"));
        assert!(ev.passes("Düsseldorf"));
        assert!(ev.passes("f|Ess"));
        assert!(!ev.passes("hbf"));
        assert!(!ev.passes("Dortmund"));
    }

    #[test]
    fn line_label_concatenates_category_and_line() {
        let t = trip(Some(TripEvent::new("2403150905", "B", "7")), None);
        assert_eq!(t.line_label(), "RE7");

        // No departure: only the category is known
        let t = trip(None, Some(TripEvent::new("2403150905", "A", "7")));
        assert_eq!(t.line_label(), "RE");
    }

    #[test]
    fn scheduled_time_parses_lazily() {
        let ev = TripEvent::new("garbage", "A", "");
        assert!(ev.scheduled_time().is_err());

        let ev = TripEvent::new("2403150905", "A", "");
        assert!(ev.scheduled_time().is_ok());
    }
}
