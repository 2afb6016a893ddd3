pub mod grid;
pub mod orientation;
pub mod process;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use heliopatch_core::io::filename::parse_observation_timestamp;

/// Resolve the observation instant: an explicit `--timestamp` wins,
/// otherwise it is parsed from the filename convention.
pub fn resolve_timestamp(path: &Path, explicit: Option<&str>) -> Result<NaiveDateTime> {
    if let Some(ts) = explicit {
        return NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| format!("Invalid timestamp '{ts}' (expected YYYY-MM-DDTHH:MM:SS)"));
    }
    parse_observation_timestamp(path)
        .with_context(|| format!("Cannot parse timestamp from '{}'", path.display()))
}
