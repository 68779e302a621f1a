//! Route files.
//!
//! A route file lists the stations of a trip, one per line, with optional
//! wait durations in between:
//!
//! ```text
//! Aachen Hbf
//! Köln Hbf
//! 45m
//! Bonn Hbf
//! ```

use std::path::{Path, PathBuf};

use crate::domain::{RouteDirective, parse_route};

/// Error loading a route file.
#[derive(Debug, thiserror::Error)]
#[error("failed to read route file {path}: {source}")]
pub struct RouteFileError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A route file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    path: PathBuf,
}

impl RouteFile {
    /// Find the route called `name`.
    ///
    /// A name that is an existing file path is used as is; anything else is
    /// looked up in `routes_dir`.
    pub fn locate(name: &str, routes_dir: &Path) -> Self {
        let direct = Path::new(name);
        let path = if direct.is_file() {
            direct.to_path_buf()
        } else {
            routes_dir.join(name)
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the route.
    pub fn load(&self) -> Result<Vec<RouteDirective>, RouteFileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_route(&text)),
            Err(source) => Err(RouteFileError {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
