//! Route resolution.
//!
//! This module turns a route's directive list into concrete stops:
//! "Starting now, which trains do I take along these stations, and when do
//! I get where?"
//!
//! Each consecutive pair of waypoints is resolved into one leg by scanning
//! hour-sliced station timetables. Legs chain through time: the next leg
//! departs no earlier than the previous one arrived.

mod config;
mod error;
mod filter;
mod itinerary;
mod resolver;

pub use config::ResolverConfig;
pub use error::PlanError;
pub use filter::filter_trips;
pub use itinerary::{Itinerary, ItineraryPlanner};
pub use resolver::{LegResolver, TimetableProvider};
