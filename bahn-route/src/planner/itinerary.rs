//! Itinerary planning over a route's directive list.

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::domain::{RouteDirective, Station, Stop};

use super::config::ResolverConfig;
use super::error::PlanError;
use super::resolver::{LegResolver, TimetableProvider};

/// The resolved stops of a route, two per leg, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Itinerary {
    pub stops: Vec<Stop>,
}

impl Itinerary {
    /// Number of resolved legs.
    pub fn legs(&self) -> usize {
        self.stops.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Walks a directive list, chaining legs through the current time.
pub struct ItineraryPlanner<'a, P: TimetableProvider> {
    provider: &'a P,
    resolver: LegResolver<'a, P>,
}

impl<'a, P: TimetableProvider> ItineraryPlanner<'a, P> {
    /// Create a new planner.
    pub fn new(provider: &'a P, config: &'a ResolverConfig) -> Self {
        Self {
            provider,
            resolver: LegResolver::new(provider, config),
        }
    }

    /// Resolve every leg of `directives`, starting at `start`.
    ///
    /// A waypoint that is first, or that directly follows a wait, only
    /// becomes the origin of the next leg. A wait advances the current time
    /// and breaks the chain: no leg is resolved across it. Each resolved leg
    /// moves the current time to its arrival, or to its departure when the
    /// arrival could not be found.
    ///
    /// Station lookups happen lazily, one per waypoint. The first error
    /// aborts the plan.
    pub async fn plan(
        &self,
        directives: &[RouteDirective],
        start: DateTime<Local>,
    ) -> Result<Itinerary, PlanError> {
        let mut current_time = start;
        let mut previous: Option<Station> = None;
        let mut fresh = true;
        let mut itinerary = Itinerary::default();

        for directive in directives {
            match directive {
                RouteDirective::Wait(duration) => {
                    current_time += *duration;
                    fresh = true;
                    debug!(wait = %directive, until = %current_time, "Waiting");
                }
                RouteDirective::Waypoint(name) => {
                    let station = self.provider.station(name).await?;

                    let origin = match previous.take() {
                        Some(origin) if !fresh => origin,
                        _ => {
                            fresh = false;
                            previous = Some(station);
                            continue;
                        }
                    };

                    let leg = self
                        .resolver
                        .resolve(&origin, &station, current_time)
                        .await?;
                    if let Some(reached) = leg.reached_at() {
                        current_time = reached;
                    }
                    info!(
                        from = %origin,
                        to = %station,
                        line = %leg.departure.line,
                        "Resolved leg"
                    );

                    let (departure, arrival) = leg.into_stops();
                    itinerary.stops.push(departure);
                    itinerary.stops.push(arrival);
                    previous = Some(station);
                }
            }
        }

        Ok(itinerary)
    }
}
