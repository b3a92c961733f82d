//! # SGP4-backed position oracle
//!
//! Bundled [`PositionOracle`] implementation that delegates orbital dynamics
//! to the `sgp4` crate and layers the frame conversions the scanners need on
//! top of its TEME state vectors:
//!
//! 1. TEME → ECEF through a GMST rotation ([`crate::time::gmst`])
//! 2. ECEF → geodetic sub-satellite point (iterative WGS84 latitude)
//! 3. ECEF → SEZ topocentric elevation/azimuth/range for an observer
//!
//! The propagation itself is treated as a black box; this module never touches
//! SGP4/SDP4 dynamics.

use hifitime::{Epoch, Unit};
use nalgebra::Vector3;

use crate::constants::{EARTH_MAJOR_AXIS_KM, RADEG, WGS84_E2};
use crate::observers::Observer;
use crate::oracle::{normalize_lon, PositionOracle, SubPoint, Topocentric};
use crate::skywatch_errors::SkywatchError;
use crate::time::gmst;
use crate::tle::TleElements;

/// Position oracle for one element set, backed by the `sgp4` crate.
pub struct Sgp4Oracle {
    constants: sgp4::Constants,
    epoch: Epoch,
}

impl Sgp4Oracle {
    /// Build an oracle from a parsed element set.
    ///
    /// The retained source lines of the record are handed to the `sgp4` crate
    /// unchanged; any propagator-side rejection surfaces as
    /// [`SkywatchError::Propagation`].
    pub fn new(elements: &TleElements) -> Result<Sgp4Oracle, SkywatchError> {
        let parsed = sgp4::Elements::from_tle(
            elements.name.clone(),
            elements.line1.as_bytes(),
            elements.line2.as_bytes(),
        )
        .map_err(|e| SkywatchError::Propagation(e.to_string()))?;

        let constants = sgp4::Constants::from_elements(&parsed)
            .map_err(|e| SkywatchError::Propagation(e.to_string()))?;

        Ok(Sgp4Oracle {
            constants,
            epoch: elements.epoch,
        })
    }

    /// Earth-fixed satellite position at `at`, kilometers.
    fn ecef_at(&self, at: Epoch) -> Result<Vector3<f64>, SkywatchError> {
        let minutes = (at - self.epoch).to_unit(Unit::Minute);
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| SkywatchError::Propagation(e.to_string()))?;

        let teme = Vector3::from(prediction.position);
        Ok(teme_to_ecef(&teme, gmst(at.to_mjd_utc_days())))
    }
}

impl PositionOracle for Sgp4Oracle {
    fn position_at(&self, at: Epoch) -> Result<SubPoint, SkywatchError> {
        let ecef = self.ecef_at(at)?;
        let (lat_deg, lon_deg, altitude_km) = ecef_to_geodetic(&ecef);
        Ok(SubPoint {
            lat_deg,
            lon_deg: normalize_lon(lon_deg),
            altitude_km,
        })
    }

    fn topocentric_at(
        &self,
        observer: &Observer,
        at: Epoch,
    ) -> Result<Topocentric, SkywatchError> {
        let sat_ecef = self.ecef_at(at)?;
        Ok(look_angles(observer, &sat_ecef))
    }
}

/// Rotate a TEME position into the Earth-fixed frame by the GMST angle.
fn teme_to_ecef(teme: &Vector3<f64>, theta: f64) -> Vector3<f64> {
    let (sin_t, cos_t) = theta.sin_cos();
    Vector3::new(
        teme.x * cos_t + teme.y * sin_t,
        -teme.x * sin_t + teme.y * cos_t,
        teme.z,
    )
}

/// Convert an Earth-fixed position (km) to geodetic latitude/longitude (deg)
/// and height above the WGS84 ellipsoid (km).
fn ecef_to_geodetic(ecef: &Vector3<f64>) -> (f64, f64, f64) {
    let a = EARTH_MAJOR_AXIS_KM;
    let lon = ecef.y.atan2(ecef.x);
    let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();

    // Fixed-point iteration on the geodetic latitude; converges to well below
    // a meter in a handful of rounds for orbital altitudes.
    let mut lat = ecef.z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..5 {
        let sin_lat = lat.sin();
        let n = a / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        lat = (ecef.z + WGS84_E2 * n * sin_lat).atan2(p);
    }

    let sin_lat = lat.sin();
    let n = a / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let height = if lat.cos().abs() > 1e-6 {
        p / lat.cos() - n
    } else {
        // Near the poles the cosine form degenerates
        ecef.z.abs() - n * (1.0 - WGS84_E2)
    };

    (lat / RADEG, lon / RADEG, height)
}

/// Convert geodetic coordinates (deg, deg, km) to an Earth-fixed position (km).
fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, height_km: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = (lat_deg * RADEG).sin_cos();
    let (sin_lon, cos_lon) = (lon_deg * RADEG).sin_cos();
    let n = EARTH_MAJOR_AXIS_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + height_km) * cos_lat * cos_lon,
        (n + height_km) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + height_km) * sin_lat,
    )
}

/// Observer-relative look angles for a satellite position in the Earth-fixed
/// frame, via the south/east/zenith topocentric basis.
fn look_angles(observer: &Observer, sat_ecef: &Vector3<f64>) -> Topocentric {
    let obs_ecef = geodetic_to_ecef(observer.latitude, observer.longitude, observer.altitude / 1000.0);
    let rho = sat_ecef - obs_ecef;

    let (sin_lat, cos_lat) = (observer.latitude * RADEG).sin_cos();
    let (sin_lon, cos_lon) = (observer.longitude * RADEG).sin_cos();

    let south = sin_lat * cos_lon * rho.x + sin_lat * sin_lon * rho.y - cos_lat * rho.z;
    let east = -sin_lon * rho.x + cos_lon * rho.y;
    let zenith = cos_lat * cos_lon * rho.x + cos_lat * sin_lon * rho.y + sin_lat * rho.z;

    let range_km = rho.norm();
    let elevation_deg = (zenith / range_km).asin() / RADEG;
    let azimuth_deg = east.atan2(-south) / RADEG;

    Topocentric {
        elevation_deg,
        azimuth_deg: azimuth_deg.rem_euclid(360.0),
        range_km,
    }
}

#[cfg(test)]
mod sgp4_oracle_test {
    use super::*;

    #[test]
    fn test_teme_to_ecef_identity_at_zero_angle() {
        let r = Vector3::new(7000.0, -1500.0, 300.0);
        assert_eq!(teme_to_ecef(&r, 0.0), r);
    }

    #[test]
    fn test_teme_to_ecef_quarter_turn() {
        let r = Vector3::new(7000.0, 0.0, 0.0);
        let rotated = teme_to_ecef(&r, std::f64::consts::FRAC_PI_2);
        assert!(rotated.x.abs() < 1e-9);
        assert!((rotated.y + 7000.0).abs() < 1e-9);
    }

    #[test]
    fn test_geodetic_ecef_roundtrip() {
        let (lat, lon, h) = (27.5667, 76.6167, 0.268);
        let ecef = geodetic_to_ecef(lat, lon, h);
        let (lat2, lon2, h2) = ecef_to_geodetic(&ecef);
        assert!((lat - lat2).abs() < 1e-8);
        assert!((lon - lon2).abs() < 1e-8);
        assert!((h - h2).abs() < 1e-6);
    }

    #[test]
    fn test_equatorial_ecef() {
        let ecef = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert!((ecef.x - EARTH_MAJOR_AXIS_KM).abs() < 1e-9);
        assert!(ecef.y.abs() < 1e-9);
        assert!(ecef.z.abs() < 1e-9);
    }

    #[test]
    fn test_look_angles_zenith_pass() {
        let observer = Observer::new(10.0, 20.0, 0.0, None);
        // Satellite 500 km straight above the observer
        let sat = geodetic_to_ecef(10.0, 20.0, 500.0);
        let topo = look_angles(&observer, &sat);
        assert!(topo.elevation_deg > 89.9);
        assert!((topo.range_km - 500.0).abs() < 1.0);
    }

    #[test]
    fn test_look_angles_northern_target() {
        let observer = Observer::new(0.0, 0.0, 0.0, None);
        // Target north of the observer, at altitude: azimuth near 0°
        let sat = geodetic_to_ecef(5.0, 0.0, 800.0);
        let topo = look_angles(&observer, &sat);
        assert!(topo.azimuth_deg < 1.0 || topo.azimuth_deg > 359.0);
        assert!(topo.elevation_deg > 0.0);
    }
}
