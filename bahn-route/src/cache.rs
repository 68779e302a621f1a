//! Caching layer for timetable responses.
//!
//! Raw response bodies are kept on disk, one file per request path, so that
//! repeated runs over the same route within a day do not hit the service
//! again. Station lookups are additionally memoised in memory for the
//! lifetime of the process.
//!
//! The cache directory may be read, written and evicted concurrently.
//! Writes are atomic per entry (temporary file plus rename) and every write
//! or eviction failure is logged and otherwise ignored.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use moka::future::Cache as MokaCache;
use tracing::{debug, trace, warn};

use crate::domain::{Eva, HourSlice, Station, Trip};
use crate::planner::{PlanError, TimetableProvider};
use crate::timetable::{
    RequestPath, TimetableClient, TimetableError, parse_station, parse_timetable,
};

/// Default entry lifetime: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on memoised station lookups.
const STATION_CAPACITY: u64 = 1000;

/// Outcome of an eviction sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionReport {
    /// Expired entries deleted.
    pub removed: usize,
    /// Expired entries that could not be deleted.
    pub failed: usize,
}

/// Disk cache for raw response bodies, keyed by request path.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache rooted at `dir` with the default TTL (24 hours).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// File holding the entry for `path`.
    ///
    /// Each request segment becomes one path component. Distinct segments
    /// always map to distinct components, none of which can escape the cache
    /// directory.
    pub fn entry_path(&self, path: &RequestPath) -> PathBuf {
        let mut file = self.dir.clone();
        for segment in path.segments() {
            file.push(encode_segment(segment));
        }
        file
    }

    /// Try to load a cached body.
    ///
    /// Returns `None` if the entry doesn't exist, can't be read, or has
    /// expired.
    pub fn read(&self, path: &RequestPath) -> Option<String> {
        let file = self.entry_path(path);
        let metadata = std::fs::metadata(&file).ok()?;

        if self.is_expired(&metadata) {
            debug!(%path, "Cache entry expired");
            return None;
        }

        std::fs::read_to_string(&file).ok()
    }

    /// Store a body, replacing any previous entry.
    ///
    /// Failures are logged and otherwise ignored: the cache is an
    /// optimisation and never fails a request.
    pub fn write(&self, path: &RequestPath, body: &str) {
        let file = self.entry_path(path);
        if let Err(e) = write_atomic(&file, body) {
            warn!(%path, file = %file.display(), error = %e, "Failed to write cache entry");
        }
    }

    /// Delete every entry older than the TTL.
    ///
    /// A missing cache directory is an empty cache.
    pub fn evict_expired(&self) -> EvictionReport {
        let mut report = EvictionReport::default();
        let mut pending = vec![self.dir.clone()];

        while let Some(dir) = pending.pop() {
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    if dir != self.dir || e.kind() != std::io::ErrorKind::NotFound {
                        warn!(dir = %dir.display(), error = %e, "Failed to scan cache directory");
                    }
                    continue;
                }
            };

            for entry in entries.flatten() {
                let Ok(metadata) = entry.metadata() else {
                    continue;
                };
                let file = entry.path();

                if metadata.is_dir() {
                    pending.push(file);
                    continue;
                }
                if !self.is_expired(&metadata) {
                    continue;
                }

                match std::fs::remove_file(&file) {
                    Ok(()) => {
                        trace!(file = %file.display(), "Evicted cache entry");
                        report.removed += 1;
                    }
                    Err(e) => {
                        warn!(file = %file.display(), error = %e, "Failed to evict cache entry");
                        report.failed += 1;
                    }
                }
            }
        }

        report
    }

    fn is_expired(&self, metadata: &std::fs::Metadata) -> bool {
        // Unknown or future mtimes count as age zero
        let age = metadata
            .modified()
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok())
            .unwrap_or_default();
        age >= self.ttl
    }
}

/// Percent-escapes separators and `%` itself. Empty, `.` and `..` segments
/// get encodings no escaped literal can produce.
fn encode_segment(segment: &str) -> String {
    match segment {
        "" => return "%".to_string(),
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }

    let mut encoded = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '/' => encoded.push_str("%2F"),
            '\\' => encoded.push_str("%5C"),
            '\0' => encoded.push_str("%00"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Write to a sibling temporary file, then rename it over `file`.
fn write_atomic(file: &Path, body: &str) -> std::io::Result<()> {
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = file.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    let tmp = file.with_file_name(tmp_name);

    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, file).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })
}

/// Timetable client with caching.
///
/// Wraps a `TimetableClient`. Station lookups go memory, then disk, then
/// network; timetables go disk, then network. Only successful responses are
/// stored.
pub struct CachedTimetableClient {
    client: TimetableClient,
    disk: ResponseCache,
    stations: MokaCache<String, Station>,
}

impl CachedTimetableClient {
    /// Create a new cached client.
    pub fn new(client: TimetableClient, disk: ResponseCache) -> Self {
        let stations = MokaCache::builder().max_capacity(STATION_CAPACITY).build();

        Self {
            client,
            disk,
            stations,
        }
    }

    /// Raw body for `path`, from disk if fresh, else from the network.
    async fn fetch(&self, path: &RequestPath) -> Result<String, TimetableError> {
        if let Some(body) = self.disk.read(path) {
            debug!(%path, "Cache hit");
            return Ok(body);
        }

        let body = self.client.fetch(path).await?;
        self.disk.write(path, &body);
        Ok(body)
    }

    /// Look up a station by name, using cache if available.
    pub async fn get_station(&self, query: &str) -> Result<Station, TimetableError> {
        if let Some(station) = self.stations.get(query).await {
            return Ok(station);
        }

        let body = self.fetch(&RequestPath::station(query)).await?;
        let station = parse_station(&body, query)?;
        debug!(query, station = %station, eva = %station.eva, "Resolved station");

        self.stations
            .insert(query.to_string(), station.clone())
            .await;
        Ok(station)
    }

    /// Get one hour of a station's timetable, using cache if available.
    pub async fn get_timetable(
        &self,
        eva: Eva,
        slice: HourSlice,
    ) -> Result<Vec<Trip>, TimetableError> {
        let body = self.fetch(&RequestPath::plan(eva, slice)).await?;
        parse_timetable(&body)
    }
}

impl TimetableProvider for CachedTimetableClient {
    async fn station(&self, query: &str) -> Result<Station, PlanError> {
        Ok(self.get_station(query).await?)
    }

    async fn timetable(&self, station: &Station, slice: HourSlice) -> Result<Vec<Trip>, PlanError> {
        Ok(self.get_timetable(station.eva, slice).await?)
    }
}
