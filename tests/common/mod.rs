//! Synthetic position oracles shared by the integration tests.
//!
//! These implement the oracle contract from scripted geometry so the scanner
//! tests are deterministic and independent of any real propagator.
#![allow(dead_code)]

use hifitime::{Epoch, TimeScale, Unit};

use skywatch::observers::Observer;
use skywatch::oracle::{PositionOracle, SubPoint, Topocentric};
use skywatch::skywatch_errors::SkywatchError;

pub fn t0() -> Epoch {
    Epoch::from_gregorian(2024, 3, 20, 0, 0, 0, 0, TimeScale::UTC)
}

/// Minutes elapsed since the shared test origin.
pub fn minutes_since_t0(at: Epoch) -> f64 {
    (at - t0()).to_unit(Unit::Minute)
}

/// Oracle whose topocentric elevation follows a piecewise-linear profile of
/// minutes since [`t0`]; azimuth ramps linearly with time.
///
/// Outside the profile's knot range the elevation holds the boundary value,
/// which makes "still above threshold at window end" scenarios easy to build.
pub struct ProfileOracle {
    /// (minutes since t0, elevation in degrees), sorted by time.
    pub profile: Vec<(f64, f64)>,
}

impl ProfileOracle {
    pub fn new(profile: Vec<(f64, f64)>) -> ProfileOracle {
        ProfileOracle { profile }
    }

    fn elevation_at(&self, minutes: f64) -> f64 {
        let first = self.profile.first().expect("profile must not be empty");
        let last = self.profile.last().expect("profile must not be empty");
        if minutes <= first.0 {
            return first.1;
        }
        if minutes >= last.0 {
            return last.1;
        }
        for pair in self.profile.windows(2) {
            let (ta, ea) = pair[0];
            let (tb, eb) = pair[1];
            if minutes >= ta && minutes <= tb {
                let f = (minutes - ta) / (tb - ta);
                return ea + f * (eb - ea);
            }
        }
        last.1
    }
}

impl PositionOracle for ProfileOracle {
    fn position_at(&self, at: Epoch) -> Result<SubPoint, SkywatchError> {
        let minutes = minutes_since_t0(at);
        Ok(SubPoint {
            lat_deg: 0.0,
            lon_deg: (minutes * 0.25).rem_euclid(360.0) - 180.0,
            altitude_km: 600.0,
        })
    }

    fn topocentric_at(
        &self,
        _observer: &Observer,
        at: Epoch,
    ) -> Result<Topocentric, SkywatchError> {
        let minutes = minutes_since_t0(at);
        Ok(Topocentric {
            elevation_deg: self.elevation_at(minutes),
            azimuth_deg: (minutes * 4.0).rem_euclid(360.0),
            range_km: 1_200.0,
        })
    }
}

/// Oracle producing a linear ground track: latitude and longitude advance at
/// constant rates from a starting point.
pub struct LinearTrackOracle {
    pub start_lat: f64,
    pub start_lon: f64,
    pub lat_per_minute: f64,
    pub lon_per_minute: f64,
}

impl PositionOracle for LinearTrackOracle {
    fn position_at(&self, at: Epoch) -> Result<SubPoint, SkywatchError> {
        let minutes = minutes_since_t0(at);
        Ok(SubPoint {
            lat_deg: self.start_lat + self.lat_per_minute * minutes,
            lon_deg: self.start_lon + self.lon_per_minute * minutes,
            altitude_km: 550.0,
        })
    }

    fn topocentric_at(
        &self,
        _observer: &Observer,
        _at: Epoch,
    ) -> Result<Topocentric, SkywatchError> {
        Err(SkywatchError::OracleContract(
            "linear track provides sub-satellite points only".into(),
        ))
    }
}
