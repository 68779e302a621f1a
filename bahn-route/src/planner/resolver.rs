//! Single-leg resolution.
//!
//! A leg is resolved in two phases against hour-sliced station timetables:
//!
//! 1. Scan the origin's timetable hour by hour, starting with the hour that
//!    contains the target time, for the first trip heading towards the
//!    destination that departs no earlier than the target. Its correlation
//!    id identifies the train.
//! 2. Scan the destination's timetable hour by hour, starting from the hour
//!    where phase 1 stopped, for the trip with the same correlation id that
//!    came from the origin. Its scheduled arrival closes the leg.
//!
//! Phase 1 failing fails the leg. Phase 2 failing leaves the arrival time
//! unset and the leg still counts.

use std::future::Future;

use chrono::{DateTime, Duration, Local};
use tracing::{debug, warn};

use crate::domain::{CorrelationId, Direction, HourSlice, Leg, Station, Stop, Trip};

use super::config::ResolverConfig;
use super::error::PlanError;
use super::filter::filter_trips;

/// Source of station lookups and hour-sliced timetables.
///
/// This abstraction allows the resolver to be tested with mock data.
pub trait TimetableProvider {
    /// Resolve a free-text station name.
    fn station(&self, query: &str) -> impl Future<Output = Result<Station, PlanError>> + Send;

    /// All trips calling at `station` within one hour slice.
    fn timetable(
        &self,
        station: &Station,
        slice: HourSlice,
    ) -> impl Future<Output = Result<Vec<Trip>, PlanError>> + Send;
}

/// The train picked at the origin.
#[derive(Debug, Clone)]
struct Boarding {
    correlation: CorrelationId,
    departure: DateTime<Local>,
    line: String,
}

/// Resolves one leg between two stations.
pub struct LegResolver<'a, P: TimetableProvider> {
    provider: &'a P,
    config: &'a ResolverConfig,
}

impl<'a, P: TimetableProvider> LegResolver<'a, P> {
    /// Create a new resolver.
    pub fn new(provider: &'a P, config: &'a ResolverConfig) -> Self {
        Self { provider, config }
    }

    /// Find the first train from `from` towards `to` departing at or after
    /// `target`, and when it reaches `to`.
    ///
    /// The departure stop's arrival is `target` itself. The arrival stop
    /// carries no line and no departure.
    pub async fn resolve(
        &self,
        from: &Station,
        to: &Station,
        target: DateTime<Local>,
    ) -> Result<Leg, PlanError> {
        let mut cursor = target - Duration::hours(1);

        let boarding = self.find_departure(from, to, target, &mut cursor).await?;
        let arrival = self
            .find_arrival(from, to, &boarding.correlation, &mut cursor)
            .await?;

        let mut departure_stop = Stop::new(from.clone());
        departure_stop.arrival = Some(target);
        departure_stop.departure = Some(boarding.departure);
        departure_stop.line = boarding.line;

        let mut arrival_stop = Stop::new(to.clone());
        arrival_stop.arrival = arrival;

        Ok(Leg {
            correlation: boarding.correlation,
            departure: departure_stop,
            arrival: arrival_stop,
        })
    }

    /// Phase 1: the cursor is advanced before each fetch, so the first slice
    /// fetched is the one containing `target`.
    async fn find_departure(
        &self,
        from: &Station,
        to: &Station,
        target: DateTime<Local>,
        cursor: &mut DateTime<Local>,
    ) -> Result<Boarding, PlanError> {
        for attempt in 1..=self.config.departure_attempts {
            *cursor += Duration::hours(1);
            let slice = HourSlice::containing(cursor);

            let trips = self.provider.timetable(from, slice).await?;
            for trip in filter_trips(&trips, &to.name, Direction::Departure) {
                let Some(event) = trip.event(Direction::Departure) else {
                    continue;
                };
                let departure = event.scheduled_time()?;
                if departure < target {
                    continue;
                }

                debug!(
                    from = %from,
                    to = %to,
                    correlation = %trip.correlation,
                    departure = %departure,
                    "Found departure"
                );
                return Ok(Boarding {
                    correlation: trip.correlation.clone(),
                    departure,
                    line: trip.line_label(),
                });
            }

            debug!(from = %from, to = %to, %slice, attempt, "No departure in slice");
        }

        Err(PlanError::RouteNotFound {
            from: from.name.clone(),
            to: to.name.clone(),
        })
    }

    /// Phase 2: the cursor is advanced after each fetch, so the first slice
    /// fetched is the one where phase 1 stopped.
    async fn find_arrival(
        &self,
        from: &Station,
        to: &Station,
        correlation: &CorrelationId,
        cursor: &mut DateTime<Local>,
    ) -> Result<Option<DateTime<Local>>, PlanError> {
        for attempt in 1..=self.config.arrival_attempts {
            let slice = HourSlice::containing(cursor);
            *cursor += Duration::hours(1);

            let trips = self.provider.timetable(to, slice).await?;
            let matched = filter_trips(&trips, &from.name, Direction::Arrival)
                .into_iter()
                .find(|t| &t.correlation == correlation);

            if let Some(event) = matched.and_then(|t| t.event(Direction::Arrival)) {
                let arrival = event.scheduled_time()?;
                debug!(from = %from, to = %to, %correlation, arrival = %arrival, "Found arrival");
                return Ok(Some(arrival));
            }

            debug!(to = %to, %correlation, %slice, attempt, "No arrival in slice");
        }

        warn!(
            from = %from,
            to = %to,
            %correlation,
            "Arrival not found, continuing without arrival time"
        );
        Ok(None)
    }
}
