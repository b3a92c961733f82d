//! # Derived orbital parameters
//!
//! Converts a parsed element set into the physical quantities used for
//! reporting and history comparison: orbital period, semi-major axis, apogee
//! and perigee altitude, and a coarse orbit classification.
//!
//! All quantities are pure functions of the element set and are recomputed on
//! demand; they are never cached independently of their source record.
//!
//! ## Units
//!
//! - Period: **minutes**
//! - Semi-major axis, apogee, perigee: **kilometers** (altitudes above a
//!   6371 km spherical mean Earth, an explicit simplification)

use serde::{Deserialize, Serialize};

use crate::constants::{DPI, EARTH_MEAN_RADIUS_KM, GM_EARTH, MINUTES_PER_DAY, SECONDS_PER_DAY};
use crate::skywatch_errors::SkywatchError;
use crate::tle::TleElements;

/// Coarse orbit classification by inclination thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitClass {
    SunSynchronous,
    Polar,
    Equatorial,
    Inclined,
}

impl std::fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrbitClass::SunSynchronous => write!(f, "Sun-Synchronous"),
            OrbitClass::Polar => write!(f, "Polar"),
            OrbitClass::Equatorial => write!(f, "Equatorial"),
            OrbitClass::Inclined => write!(f, "Inclined"),
        }
    }
}

impl OrbitClass {
    /// Classify an orbit from its inclination in degrees.
    ///
    /// Retrograde near-polar orbits in the [98°, 102°] band are graded
    /// Sun-synchronous; other high-inclination orbits are Polar; below 10°
    /// is Equatorial; everything else is Inclined.
    pub fn from_inclination(inclination_deg: f64) -> OrbitClass {
        if inclination_deg > 80.0 {
            if (98.0..=102.0).contains(&inclination_deg) {
                OrbitClass::SunSynchronous
            } else {
                OrbitClass::Polar
            }
        } else if inclination_deg < 10.0 {
            OrbitClass::Equatorial
        } else {
            OrbitClass::Inclined
        }
    }
}

/// Physical quantities derived from an element set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedParameters {
    /// Orbital period in minutes.
    pub period_minutes: f64,
    /// Semi-major axis in kilometers.
    pub semi_major_axis_km: f64,
    /// Apogee altitude above the mean Earth radius, kilometers.
    pub apogee_km: f64,
    /// Perigee altitude above the mean Earth radius, kilometers.
    pub perigee_km: f64,
    /// Coarse orbit classification.
    pub orbit_class: OrbitClass,
}

impl DerivedParameters {
    /// Derive the physical parameters of an element set.
    ///
    /// Formulas
    /// --------
    /// * `period_minutes = 1440 / mean_motion`
    /// * `a = ∛(GM / n²)` with `n` the mean motion in rad/s (Kepler III)
    /// * `apogee = a·(1 + e) − R⊕`, `perigee = a·(1 − e) − R⊕`
    ///
    /// Return
    /// ------
    /// * the derived parameters, or [`SkywatchError::NonPositiveMeanMotion`]
    ///   when the element set carries a mean motion ≤ 0 (the derivation would
    ///   otherwise divide by zero or take a negative root).
    pub fn from_elements(elements: &TleElements) -> Result<DerivedParameters, SkywatchError> {
        if elements.mean_motion <= 0.0 {
            return Err(SkywatchError::NonPositiveMeanMotion(elements.mean_motion));
        }

        let period_minutes = MINUTES_PER_DAY / elements.mean_motion;

        let n_rad_per_sec = elements.mean_motion * DPI / SECONDS_PER_DAY;
        let semi_major_axis_km = (GM_EARTH / (n_rad_per_sec * n_rad_per_sec)).cbrt();

        let apogee_km = semi_major_axis_km * (1.0 + elements.eccentricity) - EARTH_MEAN_RADIUS_KM;
        let perigee_km = semi_major_axis_km * (1.0 - elements.eccentricity) - EARTH_MEAN_RADIUS_KM;

        Ok(DerivedParameters {
            period_minutes,
            semi_major_axis_km,
            apogee_km,
            perigee_km,
            orbit_class: OrbitClass::from_inclination(elements.inclination_deg),
        })
    }
}
