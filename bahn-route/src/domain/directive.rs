//! Route directives.
//!
//! A route file is a list of lines, each naming a station or giving a wait.
//! Lines are classified once, up front, into `RouteDirective`s.

use std::fmt;

use chrono::Duration;

use super::parse_wait;

/// One parsed line of a route file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDirective {
    /// Wait this long before the next leg; the next waypoint starts afresh
    Wait(Duration),
    /// A station-name fragment
    Waypoint(String),
}

impl RouteDirective {
    /// Classify one line.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for blank lines.
    /// A line that parses as a wait-duration literal is a wait; anything
    /// else is a station name.
    ///
    /// # Examples
    ///
    /// ```
    /// use bahn_route::domain::RouteDirective;
    /// use chrono::Duration;
    ///
    /// assert_eq!(
    ///     RouteDirective::parse("90m"),
    ///     Some(RouteDirective::Wait(Duration::minutes(90)))
    /// );
    /// assert_eq!(
    ///     RouteDirective::parse(" Köln Hbf\r"),
    ///     Some(RouteDirective::Waypoint("Köln Hbf".to_string()))
    /// );
    /// assert_eq!(RouteDirective::parse("   "), None);
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        Some(match parse_wait(line) {
            Ok(duration) => RouteDirective::Wait(duration),
            Err(_) => RouteDirective::Waypoint(line.to_string()),
        })
    }
}

impl fmt::Display for RouteDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDirective::Wait(d) => write!(f, "wait {} min", d.num_minutes()),
            RouteDirective::Waypoint(name) => f.write_str(name),
        }
    }
}

/// Parse the text of a route file into directives, in order.
pub fn parse_route(text: &str) -> Vec<RouteDirective> {
    text.lines().filter_map(RouteDirective::parse).collect()
}
