//! # Constants and type definitions for skywatch
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `skywatch` library.
//!
//! ## Overview
//!
//! - Geophysical constants (gravitational parameter, Earth radii)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds/minutes)
//! - Core type aliases used across the crate
//!
//! These definitions are shared by the TLE parser, the orbital-parameter derivation and the
//! visibility scanners.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Earth gravitational parameter GM in km³/s² (EGM-96)
pub const GM_EARTH: f64 = 398_600.4418;

/// Earth mean radius in km, used for apogee/perigee altitudes above a spherical Earth
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth equatorial radius in kilometers
pub const EARTH_MAJOR_AXIS_KM: f64 = EARTH_MAJOR_AXIS / 1_000.0;

/// First eccentricity squared of the WGS84 ellipsoid
pub const WGS84_E2: f64 =
    1.0 - (EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS) * (EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS);

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Orbital revolutions per day
pub type RevPerDay = f64;
