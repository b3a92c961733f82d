use hifitime::{Epoch, TimeScale, Unit};

use crate::constants::{DPI, T2000};

/// Convert a TLE epoch (two-digit year + fractional day of year) to an absolute UTC [`Epoch`].
///
/// Two-digit years below 57 belong to the 2000s, the rest to the 1900s (the standard
/// TLE epoch rollover convention). The day of year is 1-based, so day `1.5` of year
/// `21` is 2021-01-01 12:00:00 UTC.
///
/// Arguments
/// ---------
/// * `year`: two-digit epoch year as encoded in the element set
/// * `day_of_year`: fractional day of year, 1-based
///
/// Return
/// ------
/// * the corresponding instant as a UTC [`Epoch`]
pub fn tle_epoch_to_utc(year: u32, day_of_year: f64) -> Epoch {
    let full_year = if year < 57 { 2000 + year } else { 1900 + year };
    let jan_first = Epoch::from_gregorian(full_year as i32, 1, 1, 0, 0, 0, 0, TimeScale::UTC);
    jan_first + Unit::Day * (day_of_year - 1.0)
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This implements the IAU 1982/2000 polynomial formula for the mean sidereal
/// time at 0h UT1, plus the fractional-day correction term due to Earth's
/// rotation rate. Used to rotate inertial (TEME) satellite states into the
/// Earth-fixed frame.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: f64) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Extract the integer MJD (0h UT1) and compute centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1, converted from seconds to radians
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Contribution of the fraction of the day, scaled to sidereal rate
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize to [0, 2π)
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}
