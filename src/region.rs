//! # Region presence scanner
//!
//! Answers "when is the satellite's ground track inside a geographic bounding
//! region" with adaptive dual-rate time stepping: the window is walked at a
//! coarse step while the sub-satellite point is outside the region (keeping
//! oracle calls cheap), and at a fine step while inside (so the exit is seen
//! promptly and a short next transit is not skipped over). One entry is
//! recorded per discrete transit, at the first sample found inside.

use hifitime::{Epoch, Unit};
use serde::{Deserialize, Serialize};

use crate::constants::Degree;
use crate::oracle::{normalize_lon, PositionOracle};
use crate::scan_control::ScanControl;
use crate::skywatch_errors::SkywatchError;

/// Inclusive geographic bounding region.
///
/// Longitudes follow the [-180, 180] convention; sub-satellite longitudes are
/// normalized to the same interval before the containment test, since mixed
/// conventions make the check silently fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: Degree,
    pub max_lat: Degree,
    pub min_lon: Degree,
    pub max_lon: Degree,
}

impl BoundingBox {
    pub fn new(min_lat: Degree, max_lat: Degree, min_lon: Degree, max_lon: Degree) -> BoundingBox {
        BoundingBox {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, lat_deg: Degree, lon_deg: Degree) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat_deg)
            && (self.min_lon..=self.max_lon).contains(&lon_deg)
    }
}

/// One detected region transit: the first sampled sub-satellite point inside
/// the bounding region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub time: Epoch,
    pub lat_deg: Degree,
    pub lon_deg: Degree,
}

/// Detect region transits with default (unbounded) scan limits.
pub fn find_region_entries(
    oracle: &dyn PositionOracle,
    bounding_box: &BoundingBox,
    window_start: Epoch,
    window_end: Epoch,
    coarse_step_minutes: f64,
    fine_step_minutes: f64,
    max_results: usize,
) -> Result<Vec<RegionEntry>, SkywatchError> {
    find_region_entries_with(
        oracle,
        bounding_box,
        window_start,
        window_end,
        coarse_step_minutes,
        fine_step_minutes,
        max_results,
        &ScanControl::unbounded(),
    )
}

/// Detect region transits of a satellite ground track.
///
/// Arguments
/// -----------------
/// * `oracle` – Position provider for the satellite being scanned.
/// * `bounding_box` – Inclusive latitude/longitude region of interest.
/// * `window_start`, `window_end` – Scan interval (UTC).
/// * `coarse_step_minutes` – Stride while outside the region.
/// * `fine_step_minutes` – Stride while inside the region.
/// * `max_results` – Stop once this many transits are recorded.
/// * `control` – Cooperative cancellation/time budget, checked between steps.
///
/// Return
/// ----------
/// * One [`RegionEntry`] per discrete transit, in chronological order. An
///   empty result means the ground track never entered the region.
#[allow(clippy::too_many_arguments)]
pub fn find_region_entries_with(
    oracle: &dyn PositionOracle,
    bounding_box: &BoundingBox,
    window_start: Epoch,
    window_end: Epoch,
    coarse_step_minutes: f64,
    fine_step_minutes: f64,
    max_results: usize,
    control: &ScanControl,
) -> Result<Vec<RegionEntry>, SkywatchError> {
    let mut entries = Vec::new();
    if max_results == 0 || window_end <= window_start {
        return Ok(entries);
    }

    // Guards against non-positive strides looping forever
    let coarse = coarse_step_minutes.max(1e-3);
    let fine = fine_step_minutes.max(1e-3);

    let mut inside = false;
    let mut t = window_start;
    while t <= window_end {
        control.check()?;

        let point = oracle.position_at(t)?;
        let lon_deg = normalize_lon(point.lon_deg);
        let in_region = bounding_box.contains(point.lat_deg, lon_deg);

        if in_region && !inside {
            entries.push(RegionEntry {
                time: t,
                lat_deg: point.lat_deg,
                lon_deg,
            });
            if entries.len() >= max_results {
                break;
            }
        }
        inside = in_region;

        // Fine stride inside the region, coarse stride outside
        let step_minutes = if in_region { fine } else { coarse };
        t = t + Unit::Minute * step_minutes;
    }

    Ok(entries)
}
