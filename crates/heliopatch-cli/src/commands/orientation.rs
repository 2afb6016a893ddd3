use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Args;
use heliopatch_core::consts::DEFAULT_DELTA_T_SECONDS;
use heliopatch_core::io::filename::parse_observation_timestamp;
use heliopatch_core::solar::orientation::{datetime_to_jde, orientation_from_datetime};

#[derive(Args)]
pub struct OrientationArgs {
    /// Timestamp (YYYY-MM-DDTHH:MM:SS) or an observatory filename to parse
    pub when: String,

    /// TT - UT correction in seconds
    #[arg(long, default_value_t = DEFAULT_DELTA_T_SECONDS)]
    pub delta_t: f64,
}

pub fn run(args: &OrientationArgs) -> Result<()> {
    let dt = parse_when(&args.when)?;
    let jde = datetime_to_jde(dt, args.delta_t);
    let orientation = orientation_from_datetime(dt, args.delta_t);

    println!("Observation: {dt}");
    println!("  JDE: {jde:.6}");
    println!("  B0:  {:+.4} deg", orientation.b0);
    println!("  P0:  {:+.4} deg", orientation.p0);
    println!("  L0:  {:.4} deg", orientation.l0);
    Ok(())
}

fn parse_when(when: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(when, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    parse_observation_timestamp(&PathBuf::from(when))
        .with_context(|| format!("'{when}' is neither a timestamp nor an observatory filename"))
}
