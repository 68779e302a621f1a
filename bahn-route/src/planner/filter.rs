//! Timetable filtering.

use crate::domain::{Direction, Trip};

/// Trips whose `direction` path passes through `fragment`.
///
/// Keeps a trip iff it has an event in the given direction and that event's
/// path contains `fragment` (case-sensitive substring). The result is
/// ordered by scheduled arrival, whatever the direction, so that matching
/// over it is deterministic. Trips without an arrival sort first; the sort
/// is stable.
pub fn filter_trips<'a>(trips: &'a [Trip], fragment: &str, direction: Direction) -> Vec<&'a Trip> {
    let mut kept: Vec<&Trip> = trips
        .iter()
        .filter(|t| t.event(direction).is_some_and(|e| e.passes(fragment)))
        .collect();

    kept.sort_by(|a, b| arrival_key(a).cmp(arrival_key(b)));
    kept
}

/// Compact `YYMMDDHHmm` strings order the same as the times they encode.
fn arrival_key(trip: &Trip) -> &str {
    trip.arrival.as_ref().map_or("", |a| a.scheduled.as_str())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{CorrelationId, LineInfo, TripEvent};
    use proptest::prelude::*;

    fn arb_event() -> impl Strategy<Value = Option<TripEvent>> {
        proptest::option::of(
            ("24031[0-9][0-2][0-9][0-5][0-9]", "[ABZ|]{0,6}")
                .prop_map(|(t, p)| TripEvent::new(t, p, "")),
        )
    }

    fn arb_trips() -> impl Strategy<Value = Vec<Trip>> {
        let pairs = proptest::collection::vec((arb_event(), arb_event()), 0..20);
        pairs.prop_map(|events| {
            events
                .into_iter()
                .enumerate()
                .map(|(i, (arrival, departure))| Trip {
                    id: format!("{i}-1"),
                    correlation: CorrelationId::from_trip_id(&format!("{i}-1")).unwrap(),
                    line_info: LineInfo::default(),
                    arrival,
                    departure,
                })
                .collect()
        })
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Departure), Just(Direction::Arrival)]
    }

    proptest! {
        /// A trip is kept iff its path in the direction contains the fragment
        #[test]
        fn keeps_exactly_matching(
            trips in arb_trips(),
            fragment in "[ABZ]{1,2}",
            dir in arb_direction(),
        ) {
            let kept = filter_trips(&trips, &fragment, dir);
            for t in &trips {
                let expected = t.event(dir).is_some_and(|e| e.path.contains(fragment.as_str()));
                let present = kept.iter().any(|k| k.id == t.id);
                prop_assert_eq!(expected, present);
            }
        }

        /// The kept list is non-decreasing by arrival time
        #[test]
        fn sorted_by_arrival(
            trips in arb_trips(),
            fragment in "[ABZ]{1,2}",
            dir in arb_direction(),
        ) {
            let kept = filter_trips(&trips, &fragment, dir);
            for pair in kept.windows(2) {
                prop_assert!(arrival_key(pair[0]) <= arrival_key(pair[1]));
            }
        }
    }
}
