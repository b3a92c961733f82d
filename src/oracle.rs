//! # Position oracle contract
//!
//! The visibility and region scanners never propagate orbits themselves; they
//! consult a [`PositionOracle`], the abstraction over an SGP4-class propagator
//! that can answer two questions for any instant:
//!
//! - where is the sub-satellite point ([`PositionOracle::position_at`])
//! - where does the satellite appear in an observer's sky
//!   ([`PositionOracle::topocentric_at`])
//!
//! Instants are absolute UTC [`Epoch`] values. Latitudes are reported in
//! [-90°, 90°] and longitudes normalized to [-180°, 180°]; mixed longitude
//! conventions silently break bounding-box checks, so implementations must
//! normalize before returning.
//!
//! The crate ships one implementation, [`Sgp4Oracle`](crate::sgp4_oracle::Sgp4Oracle),
//! backed by the `sgp4` crate; tests substitute synthetic oracles.

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer};
use crate::observers::Observer;
use crate::skywatch_errors::SkywatchError;

/// Geodetic sub-satellite point at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubPoint {
    /// Geodetic latitude, degrees, in [-90, 90].
    pub lat_deg: Degree,
    /// Longitude, degrees east, normalized to [-180, 180].
    pub lon_deg: Degree,
    /// Height above the ellipsoid, kilometers.
    pub altitude_km: Kilometer,
}

/// Observer-relative look angles at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Topocentric {
    /// Elevation above the local horizon, degrees.
    pub elevation_deg: Degree,
    /// Compass azimuth, degrees clockwise from north, in [0, 360).
    pub azimuth_deg: Degree,
    /// Slant range, kilometers.
    pub range_km: Kilometer,
}

/// Contract of the external satellite position provider.
///
/// Both queries are side-effect-free and independent across instants, so a
/// scanner may issue them from multiple threads; implementations must be
/// `Sync`.
pub trait PositionOracle: Sync {
    /// Sub-satellite geodetic coordinates at `at`.
    fn position_at(&self, at: Epoch) -> Result<SubPoint, SkywatchError>;

    /// Topocentric elevation/azimuth/range of the satellite as seen by
    /// `observer` at `at`.
    fn topocentric_at(&self, observer: &Observer, at: Epoch)
        -> Result<Topocentric, SkywatchError>;
}

/// Normalize a longitude in degrees to the [-180, 180) interval.
pub fn normalize_lon(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod oracle_test {
    use super::normalize_lon;

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(77.2), 77.2);
        assert_eq!(normalize_lon(190.0), -170.0);
        assert_eq!(normalize_lon(360.0 + 45.0), 45.0);
        assert_eq!(normalize_lon(-181.0), 179.0);
    }
}
