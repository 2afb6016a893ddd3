use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::consts::{
    SOLAR_INCLINATION_DEG, SOLAR_NODE_EPOCH_JD, SOLAR_ROTATION_EPOCH_JD,
    SOLAR_SYNODIC_PERIOD_DAYS,
};

/// Heliographic orientation of the solar disk at one instant.
///
/// Purely a function of time; computed once per image and read-only for the
/// rest of that image's processing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrientationParams {
    /// Heliographic latitude of the disk center, degrees.
    pub b0: f64,
    /// Position angle of the rotation axis, degrees (east of celestial north).
    pub p0: f64,
    /// Heliographic longitude of the central meridian, degrees in [0, 360).
    pub l0: f64,
}

/// Convert a UTC timestamp to a Julian Ephemeris Date.
///
/// Standard calendar-to-JD formula (Meeus ch. 7) plus the TT-UT correction
/// `delta_t_seconds`, which drifts with leap seconds and is therefore a
/// parameter rather than a constant.
pub fn datetime_to_jde(dt: NaiveDateTime, delta_t_seconds: f64) -> f64 {
    let mut year = dt.year() as f64;
    let mut month = dt.month() as f64;
    let day = dt.day() as f64;

    // January and February count as months 13 and 14 of the previous year.
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let day_fraction = (dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + dt.second() as f64 / 3600.0)
        / 24.0;

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + day_fraction
        + b
        - 1524.5
        + delta_t_seconds / 86_400.0
}

/// Apparent solar position: ecliptic longitude, Earth-Sun distance,
/// obliquity of the ecliptic.
#[derive(Clone, Copy, Debug)]
pub struct SunPosition {
    /// Apparent ecliptic longitude, degrees in [0, 360).
    pub apparent_longitude: f64,
    /// Earth-Sun distance in AU.
    pub distance_au: f64,
    /// True obliquity of the ecliptic, degrees.
    pub obliquity: f64,
}

/// Low-order polynomial ephemeris for the apparent solar longitude.
///
/// Mean longitude and anomaly, equation-of-center correction, and the four
/// largest nutation terms. Good to well under a tenth of a degree over the
/// modern era, which is plenty for sub-degree disk orientation.
pub fn sun_position(jde: f64) -> SunPosition {
    let t = (jde - 2_451_545.0) / 36_525.0;

    // Mean geometric longitude and mean anomaly.
    let l = 280.46645 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let ma = (357.52910 + 35_999.05030 * t - 0.000_155_9 * t * t - 0.000_000_48 * t * t * t)
        .rem_euclid(360.0)
        .to_radians();

    // Orbital eccentricity.
    let e = 0.016_708_617 - 0.000_042_037 * t - 0.000_000_123_6 * t * t;

    // Equation of center.
    let c = (1.914_600 - 0.004_817 * t - 0.000_014 * t * t) * ma.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * ma).sin()
        + 0.000_290 * (3.0 * ma).sin();

    // True longitude and anomaly.
    let true_longitude = l + c;
    let v = ma + c.to_radians();

    let distance_au = (1.000_001_018 * (1.0 - e * e)) / (1.0 + e * v.cos());

    // Nutation in longitude and obliquity (largest four terms, arcseconds).
    let omega = (125.04452 - 1934.136_261 * t).to_radians();
    let ls = (280.4665 + 36_000.7698 * t).to_radians();
    let lm = (218.3165 + 481_267.8813 * t).to_radians();

    let delta_psi = (-17.20 * omega.sin() - 1.32 * (2.0 * ls).sin() - 0.23 * (2.0 * lm).sin()
        + 0.21 * (2.0 * omega).sin())
        / 3600.0;
    let delta_epsilon = (9.20 * omega.cos() + 0.57 * (2.0 * ls).cos() + 0.10 * (2.0 * lm).cos()
        - 0.09 * (2.0 * omega).cos())
        / 3600.0;

    let mean_obliquity =
        (84_381.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t) / 3600.0;

    SunPosition {
        apparent_longitude: (true_longitude + delta_psi).rem_euclid(360.0),
        distance_au,
        obliquity: mean_obliquity + delta_epsilon,
    }
}

/// Compute B0, P0, L0 from a Julian Ephemeris Date.
pub fn orientation_at_jde(jde: f64) -> OrientationParams {
    let sun = sun_position(jde);
    let sl = sun.apparent_longitude;
    let sl_rad = sl.to_radians();
    let eps_rad = sun.obliquity.to_radians();

    // Solar rotation phase from the fixed synodic period and epoch.
    let theta = ((jde - SOLAR_ROTATION_EPOCH_JD) * 360.0 / SOLAR_SYNODIC_PERIOD_DAYS)
        .rem_euclid(360.0);

    // Ascending node of the solar equator on the ecliptic; the inclination
    // is constant, the node drifts linearly.
    let i_rad = SOLAR_INCLINATION_DEG.to_radians();
    let k = 73.6667 + 1.395_833_3 * (jde - SOLAR_NODE_EPOCH_JD) / 36_525.0;
    let k_rad = k.to_radians();

    let x = (-sl_rad.cos() * eps_rad.tan()).atan();
    let y = (-(sl_rad - k_rad).cos() * i_rad.tan()).atan();
    let p0 = (x + y).to_degrees();

    let b0 = ((sl_rad - k_rad).sin() * i_rad.sin()).asin().to_degrees();

    let eta_raw = ((sl_rad - k_rad).tan() * i_rad.cos()).atan().to_degrees();
    let eta = quadrant_correct_eta(eta_raw, sl - k);

    let l0 = (eta - theta).rem_euclid(360.0);

    OrientationParams { b0, p0, l0 }
}

/// Place the raw arctangent result in the quadrant of `sl_minus_k`.
///
/// `atan` only resolves angles within (-90, 90); when (SL - K) mod 360 lies
/// in (90, 270] the true angle is on the other branch, half a turn away.
pub fn quadrant_correct_eta(eta_deg: f64, sl_minus_k_deg: f64) -> f64 {
    let d = sl_minus_k_deg.rem_euclid(360.0);
    if d > 90.0 && d <= 270.0 {
        if eta_deg > 0.0 {
            eta_deg - 180.0
        } else {
            eta_deg + 180.0
        }
    } else {
        eta_deg
    }
}

/// Compute B0, P0, L0 directly from a UTC timestamp.
pub fn orientation_from_datetime(dt: NaiveDateTime, delta_t_seconds: f64) -> OrientationParams {
    orientation_at_jde(datetime_to_jde(dt, delta_t_seconds))
}
