//! Itinerary output.
//!
//! Two formats: a tab-aligned text table for the terminal and a JSON array
//! for scripts.

use std::io::{self, Write};

use serde::Serialize;

use crate::domain::{Eva, Stop, format_clock};

/// Minimum column width, padding included.
const MIN_WIDTH: usize = 5;

/// Spaces after the widest cell of a column.
const PADDING: usize = 3;

/// Placeholder for a stop without any time.
const NO_TIME: &str = "--:--";

const HEADER: [&str; 4] = ["# Station", "arrival", "departure", "line"];

/// One stop as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopRow {
    /// Position in the itinerary, from 0
    pub index: usize,
    /// Station name
    pub station: String,
    /// Station EVA number
    pub eva: Eva,
    /// Arrival as HH:MM, falling back to the departure
    pub arrival: Option<String>,
    /// Departure as HH:MM, falling back to the arrival
    pub departure: Option<String>,
    /// Line boarded here
    pub line: String,
}

impl StopRow {
    pub fn new(index: usize, stop: &Stop) -> Self {
        Self {
            index,
            station: stop.station.name.clone(),
            eva: stop.station.eva,
            arrival: stop.shown_arrival().map(|t| format_clock(&t)),
            departure: stop.shown_departure().map(|t| format_clock(&t)),
            line: stop.line.clone(),
        }
    }

    fn cells(&self) -> [String; 4] {
        [
            format!("{} {}", self.index, self.station),
            self.arrival.as_deref().unwrap_or(NO_TIME).to_string(),
            self.departure.as_deref().unwrap_or(NO_TIME).to_string(),
            self.line.clone(),
        ]
    }
}

/// Rows for the given stops, indexed in order.
pub fn rows(stops: &[Stop]) -> Vec<StopRow> {
    stops
        .iter()
        .enumerate()
        .map(|(i, stop)| StopRow::new(i, stop))
        .collect()
}

/// Write the stops as an aligned table with a header line.
pub fn write_table<W: Write>(out: &mut W, stops: &[Stop]) -> io::Result<()> {
    let mut lines: Vec<[String; 4]> = vec![HEADER.map(str::to_string)];
    lines.extend(rows(stops).iter().map(StopRow::cells));

    // Every column but the last is padded to a common width
    let mut widths = [0usize; 3];
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count() + PADDING);
        }
    }
    for width in &mut widths {
        *width = (*width).max(MIN_WIDTH);
    }

    for line in &lines {
        let mut text = String::new();
        for (cell, width) in line.iter().zip(widths) {
            text.push_str(cell);
            let fill = width.saturating_sub(cell.chars().count());
            text.extend(std::iter::repeat_n(' ', fill));
        }
        text.push_str(&line[3]);
        writeln!(out, "{}", text.trim_end())?;
    }

    Ok(())
}

/// Write the stops as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, stops: &[Stop]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &rows(stops))?;
    writeln!(out).map_err(serde_json::Error::io)
}
