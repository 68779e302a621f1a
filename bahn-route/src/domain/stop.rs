//! Itinerary stops and legs.

use chrono::{DateTime, Local};

use super::{CorrelationId, Station};

/// A station visit in a resolved itinerary.
///
/// Either time may be unset. For display, a missing departure falls back to
/// the arrival and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// The station
    pub station: Station,
    /// Arrival at the station
    pub arrival: Option<DateTime<Local>>,
    /// Departure from the station
    pub departure: Option<DateTime<Local>>,
    /// Line label of the train boarded here (empty when alighting)
    pub line: String,
}

impl Stop {
    /// Creates a stop with no times and no line.
    pub fn new(station: Station) -> Self {
        Self {
            station,
            arrival: None,
            departure: None,
            line: String::new(),
        }
    }

    /// Arrival time to display.
    pub fn shown_arrival(&self) -> Option<DateTime<Local>> {
        self.arrival.or(self.departure)
    }

    /// Departure time to display.
    pub fn shown_departure(&self) -> Option<DateTime<Local>> {
        self.departure.or(self.arrival)
    }
}

/// One train ride between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// The train's cross-station id
    pub correlation: CorrelationId,
    /// Boarding stop at the origin
    pub departure: Stop,
    /// Alighting stop at the destination; its arrival is unset when the
    /// train could not be found in the destination's timetable
    pub arrival: Stop,
}

impl Leg {
    /// Time the rider is at the destination, as far as it is known.
    ///
    /// Falls back to the departure time when the arrival was not found.
    pub fn reached_at(&self) -> Option<DateTime<Local>> {
        self.arrival.arrival.or(self.departure.departure)
    }

    /// Consumes the leg and returns its (departure, arrival) stops.
    pub fn into_stops(self) -> (Stop, Stop) {
        (self.departure, self.arrival)
    }
}
