//! Timetable service client.
//!
//! This module provides an HTTP client for the Deutsche Bahn timetables API,
//! which serves station lookups and per-station scheduled timetables.
//!
//! Key characteristics of the service:
//! - Responses are XML
//! - A timetable request covers exactly one hour at one station
//! - Trip ids differ per station, but embed a shared correlation fragment
//! - Scheduled times are compact `YYMMDDHHmm` strings in local time

mod client;
mod convert;
mod error;
mod request;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TimetableClient, TimetableConfig};
pub use convert::{parse_station, parse_timetable};
pub use error::TimetableError;
pub use request::RequestPath;
pub use types::{EventDto, StationDto, StationsDto, TimetableDto, TimetableStopDto, TripLabelDto};
