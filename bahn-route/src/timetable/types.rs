//! Timetable API response DTOs.
//!
//! These types map directly to the XML returned by the timetable service.
//! Attributes are `Option` or defaulted because the service omits them rather
//! than sending empty values: a trip starting at the station has no `ar`
//! element, one terminating there has no `dp`, and `l` is only present for
//! numbered lines.

use serde::Deserialize;

/// Response from `/station/<query>`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsDto {
    /// Matching stations, best match first.
    #[serde(rename = "station", default)]
    pub stations: Vec<StationDto>,
}

/// A station entry in a lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    /// Station name.
    #[serde(rename = "@name", default)]
    pub name: String,

    /// EVA number; 0 means "not found".
    #[serde(rename = "@eva", default)]
    pub eva: u64,
}

/// Response from `/plan/<eva>/<YYMMDD>/<HH>`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableDto {
    /// Station name the timetable belongs to.
    #[serde(rename = "@station")]
    pub station: Option<String>,

    /// Scheduled stops in this hour.
    #[serde(rename = "s", default)]
    pub stops: Vec<TimetableStopDto>,
}

/// A trip's scheduled stop at the timetable's station.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableStopDto {
    /// Station-specific trip id.
    #[serde(rename = "@id")]
    pub id: String,

    /// Trip label.
    #[serde(rename = "tl")]
    pub trip_label: Option<TripLabelDto>,

    /// Arrival event.
    #[serde(rename = "ar")]
    pub arrival: Option<EventDto>,

    /// Departure event.
    #[serde(rename = "dp")]
    pub departure: Option<EventDto>,
}

/// Trip label (`tl`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripLabelDto {
    /// Filter flags.
    #[serde(rename = "@f")]
    pub f: Option<String>,

    /// Trip type.
    #[serde(rename = "@t")]
    pub t: Option<String>,

    /// Owner.
    #[serde(rename = "@o")]
    pub o: Option<String>,

    /// Category, e.g. "ICE".
    #[serde(rename = "@c")]
    pub c: Option<String>,

    /// Train number.
    #[serde(rename = "@n")]
    pub n: Option<String>,
}

/// Arrival (`ar`) or departure (`dp`) event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDto {
    /// Planned time, `YYMMDDHHmm`.
    #[serde(rename = "@pt")]
    pub pt: Option<String>,

    /// Planned path, pipe-separated station names.
    #[serde(rename = "@ppth")]
    pub ppth: Option<String>,

    /// Line.
    #[serde(rename = "@l")]
    pub l: Option<String>,
}
