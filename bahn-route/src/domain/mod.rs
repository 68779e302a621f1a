//! Domain types for the route resolver.
//!
//! This module contains the validated value types that the planner works
//! with. Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod correlation;
mod directive;
mod station;
mod stop;
mod time;
mod trip;
mod wait;

pub use correlation::{CorrelationId, InvalidCorrelation};
pub use directive::{RouteDirective, parse_route};
pub use station::{Eva, InvalidEva, Station};
pub use stop::{Leg, Stop};
pub use time::{HourSlice, TimeError, format_clock, parse_clock, parse_scheduled};
pub use trip::{Direction, LineInfo, Trip, TripEvent};
pub use wait::{InvalidWait, parse_wait};
