//! # TLE history comparator
//!
//! Computes per-parameter drift between two element sets of the same object,
//! used for freshness and quality auditing of a TLE archive. Both records are
//! run through the orbital-parameter derivation so the comparison covers the
//! raw elements (inclination, RAAN, eccentricity, argument of perigee, mean
//! anomaly, mean motion) as well as the derived quantities (period, apogee,
//! perigee, semi-major axis).
//!
//! The comparator does not reorder its inputs: supplying records out of
//! chronological order yields a negative elapsed time, which is the caller's
//! responsibility to interpret.

use hifitime::Unit;
use serde::Serialize;

use crate::orbital_params::DerivedParameters;
use crate::skywatch_errors::{ComparisonSide, SkywatchError};
use crate::tle::{parse_tle, TleElements};

/// Names of the tracked parameters, in reporting order.
pub const TRACKED_PARAMETERS: [&str; 10] = [
    "inclination",
    "ra_of_ascending_node",
    "eccentricity",
    "argument_of_perigee",
    "mean_anomaly",
    "mean_motion",
    "period",
    "apogee",
    "perigee",
    "semi_major_axis",
];

/// Drift of one tracked parameter between two element sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDelta {
    pub parameter: &'static str,
    pub current: f64,
    pub previous: f64,
    pub absolute_delta: f64,
    /// Percent drift relative to the previous value; 0 when the previous
    /// value is 0, to avoid a division by zero.
    pub percent_delta: f64,
}

impl ParameterDelta {
    fn between(parameter: &'static str, current: f64, previous: f64) -> ParameterDelta {
        let absolute_delta = current - previous;
        let percent_delta = if previous != 0.0 {
            absolute_delta / previous * 100.0
        } else {
            0.0
        };
        ParameterDelta {
            parameter,
            current,
            previous,
            absolute_delta,
            percent_delta,
        }
    }
}

/// Epoch-to-epoch drift report for one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TleComparison {
    /// One delta per entry of [`TRACKED_PARAMETERS`], in that order.
    pub deltas: Vec<ParameterDelta>,
    /// Days elapsed from the previous epoch to the current one; negative when
    /// the records were supplied out of chronological order.
    pub elapsed_days: f64,
}

impl TleComparison {
    /// Look up one tracked parameter by name.
    pub fn delta(&self, parameter: &str) -> Option<&ParameterDelta> {
        self.deltas.iter().find(|d| d.parameter == parameter)
    }
}

/// Compare two parsed element sets of the same object.
///
/// Arguments
/// -----------------
/// * `current` – The newer element set.
/// * `previous` – The older element set.
///
/// Return
/// ----------
/// * A [`TleComparison`] with one [`ParameterDelta`] per tracked parameter,
///   or a [`SkywatchError::Comparison`] naming the side whose derivation
///   failed.
pub fn compare(
    current: &TleElements,
    previous: &TleElements,
) -> Result<TleComparison, SkywatchError> {
    let current_derived = derive_side(current, ComparisonSide::Current)?;
    let previous_derived = derive_side(previous, ComparisonSide::Previous)?;

    let pairs: [(f64, f64); 10] = [
        (current.inclination_deg, previous.inclination_deg),
        (current.raan_deg, previous.raan_deg),
        (current.eccentricity, previous.eccentricity),
        (current.arg_perigee_deg, previous.arg_perigee_deg),
        (current.mean_anomaly_deg, previous.mean_anomaly_deg),
        (current.mean_motion, previous.mean_motion),
        (
            current_derived.period_minutes,
            previous_derived.period_minutes,
        ),
        (current_derived.apogee_km, previous_derived.apogee_km),
        (current_derived.perigee_km, previous_derived.perigee_km),
        (
            current_derived.semi_major_axis_km,
            previous_derived.semi_major_axis_km,
        ),
    ];

    let deltas = TRACKED_PARAMETERS
        .iter()
        .zip(pairs)
        .map(|(name, (cur, prev))| ParameterDelta::between(name, cur, prev))
        .collect();

    Ok(TleComparison {
        deltas,
        elapsed_days: (current.epoch - previous.epoch).to_unit(Unit::Day),
    })
}

/// Compare two element sets supplied as raw TLE text.
///
/// A parse failure on either side is attributed to that side, like a
/// derivation failure in [`compare`].
pub fn compare_texts(current: &str, previous: &str) -> Result<TleComparison, SkywatchError> {
    let current = parse_side(current, ComparisonSide::Current)?;
    let previous = parse_side(previous, ComparisonSide::Previous)?;
    compare(&current, &previous)
}

fn parse_side(text: &str, side: ComparisonSide) -> Result<TleElements, SkywatchError> {
    parse_tle(text).map_err(|e| SkywatchError::Comparison {
        side,
        source: Box::new(e),
    })
}

fn derive_side(
    elements: &TleElements,
    side: ComparisonSide,
) -> Result<DerivedParameters, SkywatchError> {
    DerivedParameters::from_elements(elements).map_err(|e| SkywatchError::Comparison {
        side,
        source: Box::new(e),
    })
}
