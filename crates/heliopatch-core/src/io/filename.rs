use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{HeliopatchError, Result};

/// Parse the observation instant from an observatory filename stem of the
/// form `YYYYMMDD_HHMMSS_<suffix>` (e.g. `20140209_101500_SDO_2048_00.jpg`).
pub fn parse_observation_timestamp(path: &Path) -> Result<NaiveDateTime> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| HeliopatchError::InvalidTimestamp(path.display().to_string()))?;

    let invalid = || HeliopatchError::InvalidTimestamp(stem.to_string());

    let mut parts = stem.split('_');
    let date_part = parts.next().ok_or_else(invalid)?;
    let time_part = parts.next().ok_or_else(invalid)?;

    if date_part.len() != 8 || time_part.len() != 6 {
        return Err(invalid());
    }

    let field = |s: &str, range: std::ops::Range<usize>| -> Result<u32> {
        s.get(range)
            .and_then(|f| f.parse::<u32>().ok())
            .ok_or_else(invalid)
    };

    let year = field(date_part, 0..4)? as i32;
    let month = field(date_part, 4..6)?;
    let day = field(date_part, 6..8)?;
    let hour = field(time_part, 0..2)?;
    let minute = field(time_part, 2..4)?;
    let second = field(time_part, 4..6)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)?;
    Ok(NaiveDateTime::new(date, time))
}
