//! Deutsche Bahn route resolver.
//!
//! A command-line tool that answers: "If I set off now along this list of
//! stations, which trains do I take and when do I get where?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod planner;
pub mod render;
pub mod route;
pub mod timetable;
