//! Conversion from timetable DTOs to domain types.
//!
//! Parses the raw XML bodies and turns them into validated `Station` and
//! `Trip` values. The correlation id is extracted here, once per trip.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{CorrelationId, Eva, InvalidCorrelation, LineInfo, Station, Trip, TripEvent};

use super::error::TimetableError;
use super::types::{EventDto, StationsDto, TimetableDto, TimetableStopDto, TripLabelDto};

/// Parse a station lookup body and take the best match.
///
/// The first entry is the match. An empty result or an EVA number of zero
/// means the service found nothing for `query`.
pub fn parse_station(body: &str, query: &str) -> Result<Station, TimetableError> {
    let dto: StationsDto = from_xml(body)?;

    let first = dto
        .stations
        .into_iter()
        .next()
        .ok_or_else(|| TimetableError::StationNotFound(query.to_string()))?;

    let Ok(eva) = Eva::new(first.eva) else {
        return Err(TimetableError::StationNotFound(query.to_string()));
    };

    Ok(Station::new(first.name, eva))
}

/// Parse a timetable body into trips, in the order the service listed them.
pub fn parse_timetable(body: &str) -> Result<Vec<Trip>, TimetableError> {
    let dto: TimetableDto = from_xml(body)?;

    Ok(convert_timetable(dto))
}

fn from_xml<T: DeserializeOwned>(body: &str) -> Result<T, TimetableError> {
    quick_xml::de::from_str(body).map_err(|e| TimetableError::xml(e, body))
}

/// Convert a timetable DTO to trips.
///
/// Trips whose id carries no correlation suffix cannot be matched across
/// stations and are skipped with a warning rather than failing the whole
/// timetable.
pub fn convert_timetable(dto: TimetableDto) -> Vec<Trip> {
    let mut trips = Vec::with_capacity(dto.stops.len());

    for stop in dto.stops {
        match convert_stop(stop) {
            Ok(trip) => trips.push(trip),
            Err(e) => {
                warn!(
                    station = dto.station.as_deref().unwrap_or("?"),
                    error = %e,
                    "Skipping timetable entry"
                );
            }
        }
    }

    trips
}

fn convert_stop(stop: TimetableStopDto) -> Result<Trip, InvalidCorrelation> {
    let correlation = CorrelationId::from_trip_id(&stop.id)?;

    Ok(Trip {
        id: stop.id,
        correlation,
        line_info: convert_trip_label(stop.trip_label.unwrap_or_default()),
        departure: stop.departure.map(convert_event),
        arrival: stop.arrival.map(convert_event),
    })
}

fn convert_trip_label(tl: TripLabelDto) -> LineInfo {
    LineInfo {
        flags: tl.f.unwrap_or_default(),
        trip_type: tl.t.unwrap_or_default(),
        owner: tl.o.unwrap_or_default(),
        category: tl.c.unwrap_or_default(),
        number: tl.n.unwrap_or_default(),
    }
}

fn convert_event(ev: EventDto) -> TripEvent {
    TripEvent {
        scheduled: ev.pt.unwrap_or_default(),
        path: ev.ppth.unwrap_or_default(),
        line: ev.l.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<stations>
  <station p="1|2|3" meta="8098105" name="Frankfurt(Main)Hbf" eva="8000105" ds100="FF" db="true" creationts="19-01-02 12:33:52.541"/>
  <station name="Frankfurt(Main)Hbf (tief)" eva="8098105"/>
</stations>"#;

    const TIMETABLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<timetable station="Frankfurt(Main)Hbf">
  <s id="-7874571842864554321-2403150905-1">
    <tl f="F" t="p" o="80" c="ICE" n="1234"/>
    <ar pt="2403150858" pp="7" ppth="Berlin Hbf|Kassel-Wilhelmshöhe"/>
    <dp pt="2403150905" pp="7" ppth="Mannheim Hbf|Stuttgart Hbf"/>
  </s>
  <s id="5554-2403150912-1">
    <tl f="D" t="p" o="800337" c="RE" n="4711"/>
    <dp pt="2403150912" pp="12" l="7" ppth="Offenbach Hbf|Hanau Hbf"/>
  </s>
  <s id="broken">
    <tl c="S" n="1"/>
    <ar pt="2403150930" ppth="Wiesbaden Hbf"/>
  </s>
</timetable>"#;

    #[test]
    fn station_takes_first_match() {
        let station = parse_station(STATIONS_XML, "Frankfurt").unwrap();
        assert_eq!(station.name, "Frankfurt(Main)Hbf");
        assert_eq!(station.eva.get(), 8000105);
    }

    #[test]
    fn station_zero_eva_not_found() {
        let xml = r#"<stations><station name="" eva="0"/></stations>"#;
        match parse_station(xml, "Nowhere") {
            Err(TimetableError::StationNotFound(q)) => assert_eq!(q, "Nowhere"),
            other => panic!("expected StationNotFound, got {other:?}"),
        }
    }

    #[test]
    fn station_empty_list_not_found() {
        let xml = r#"<stations/>"#;
        assert!(matches!(
            parse_station(xml, "Nowhere"),
            Err(TimetableError::StationNotFound(_))
        ));
    }

    #[test]
    fn station_malformed_xml() {
        assert!(matches!(
            parse_station("<stations><station", "Hbf"),
            Err(TimetableError::Xml { .. })
        ));
    }

    #[test]
    fn timetable_converts_and_skips_uncorrelated() {
        let trips = parse_timetable(TIMETABLE_XML).unwrap();
        assert_eq!(trips.len(), 2);

        let ice = &trips[0];
        assert_eq!(ice.correlation.as_str(), "-7874571842864554321-2");
        assert_eq!(ice.line_info.category, "ICE");
        assert_eq!(ice.line_info.number, "1234");
        assert_eq!(ice.line_info.owner, "80");
        let arrival = ice.arrival.as_ref().unwrap();
        assert_eq!(arrival.scheduled, "2403150858");
        assert_eq!(arrival.path, "Berlin Hbf|Kassel-Wilhelmshöhe");
        let departure = ice.departure.as_ref().unwrap();
        assert_eq!(departure.path, "Mannheim Hbf|Stuttgart Hbf");
        assert_eq!(departure.line, "");
        assert_eq!(ice.line_label(), "ICE");

        let re = &trips[1];
        assert_eq!(re.correlation.as_str(), "5554-2");
        assert!(re.arrival.is_none());
        assert_eq!(re.line_label(), "RE7");
    }

    #[test]
    fn empty_timetable() {
        let trips = parse_timetable(r#"<timetable station="Hbf"/>"#).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn timetable_malformed_xml() {
        assert!(matches!(
            parse_timetable("<timetable><s id="),
            Err(TimetableError::Xml { .. })
        ));
    }

    #[test]
    fn missing_attributes_default_to_empty() {
        let xml = r#"<timetable><s id="12-3"><dp pt="2403150905"/></s></timetable>"#;
        let trips = parse_timetable(xml).unwrap();
        let dep = trips[0].departure.as_ref().unwrap();
        assert_eq!(dep.scheduled, "2403150905");
        assert_eq!(dep.path, "");
        assert_eq!(dep.line, "");
        assert!(trips[0].arrival.is_none());
        assert_eq!(trips[0].line_info, LineInfo::default());
    }
}
