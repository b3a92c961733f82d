//! # Multi-satellite batch scanning
//!
//! Runs the pass scanner over a whole set of element sets for one observer,
//! with the isolation and resource bounds a serving layer needs:
//!
//! - **Per-satellite isolation** – a parse, derivation or oracle failure is
//!   recorded against that satellite and the batch continues; "no passes in
//!   range" stays distinguishable from "failed to compute passes".
//! - **Bounded worker pool** – per-satellite scans are independent and run on
//!   a rayon pool capped at a configured width, so concurrent oracle load
//!   stays bounded.
//! - **Deadlines and cancellation** – each scan can carry a wall-clock budget
//!   (timeouts become per-satellite failures) and a shared [`CancelToken`]
//!   checked between satellites and between samples.

use std::time::Duration;

use hifitime::Epoch;
use rayon::prelude::*;
use serde::Serialize;

use crate::observers::Observer;
use crate::oracle::PositionOracle;
use crate::orbital_params::DerivedParameters;
use crate::scan_control::{CancelToken, ScanControl};
use crate::sgp4_oracle::Sgp4Oracle;
use crate::skywatch_errors::SkywatchError;
use crate::tle::{parse_tle, TleElements};
use crate::visibility::{find_passes_with, Pass, DEFAULT_STEP_SECONDS};

/// One satellite submitted to a batch scan: a display label and its element
/// set text (two or three lines).
#[derive(Debug, Clone)]
pub struct SatelliteEntry {
    pub label: String,
    pub tle: String,
}

/// Batch-wide scan settings.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Visibility threshold above the local horizon, degrees.
    pub min_elevation_deg: f64,
    /// Elevation sampling step, seconds.
    pub step_seconds: f64,
    /// Width of the worker pool, capping concurrent oracle load.
    pub max_workers: usize,
    /// Wall-clock budget per satellite; exceeding it abandons that scan only.
    pub per_satellite_timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            min_elevation_deg: 10.0,
            step_seconds: DEFAULT_STEP_SECONDS,
            max_workers: 4,
            per_satellite_timeout: None,
        }
    }
}

/// Successful scan output for one satellite.
#[derive(Debug, Clone, Serialize)]
pub struct SatellitePasses {
    pub catalog_number: u32,
    pub name: Option<String>,
    pub parameters: DerivedParameters,
    /// Complete passes over the observer; may be empty.
    pub passes: Vec<Pass>,
}

/// A satellite whose scan failed; the rest of the batch is unaffected.
#[derive(Debug)]
pub struct BatchFailure {
    pub label: String,
    pub error: SkywatchError,
}

/// Outcome of a batch scan.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub satellites: Vec<SatellitePasses>,
    pub failures: Vec<BatchFailure>,
    /// True when the caller's [`CancelToken`] stopped part of the batch.
    pub cancelled: bool,
}

/// Scan every entry with an oracle built by `make_oracle`, one per satellite.
///
/// Arguments
/// -----------------
/// * `entries` – Labeled element set texts.
/// * `observer` – Ground observer shared by the whole batch.
/// * `window_start`, `window_end` – Scan interval (UTC).
/// * `config` – Pool width, threshold, step and per-satellite budget.
/// * `cancel` – Shared cancellation flag, checked between satellites and
///   between samples.
/// * `make_oracle` – Factory producing the position oracle for one parsed
///   element set.
///
/// Return
/// ----------
/// * A [`BatchResult`] with per-satellite successes and failures. The batch
///   itself never fails.
pub fn scan_all<F>(
    entries: &[SatelliteEntry],
    observer: &Observer,
    window_start: Epoch,
    window_end: Epoch,
    config: &BatchConfig,
    cancel: &CancelToken,
    make_oracle: F,
) -> BatchResult
where
    F: Fn(&TleElements) -> Result<Box<dyn PositionOracle>, SkywatchError> + Sync,
{
    let scan_one = |entry: &SatelliteEntry| -> Result<SatellitePasses, SkywatchError> {
        if cancel.is_cancelled() {
            return Err(SkywatchError::Cancelled);
        }

        let elements = parse_tle(&entry.tle)?;
        let parameters = DerivedParameters::from_elements(&elements)?;
        let oracle = make_oracle(&elements)?;

        let mut control = ScanControl::unbounded().with_cancel(cancel.clone());
        if let Some(budget) = config.per_satellite_timeout {
            control = control.with_timeout(budget);
        }

        let passes = find_passes_with(
            oracle.as_ref(),
            observer,
            window_start,
            window_end,
            config.min_elevation_deg,
            config.step_seconds,
            &control,
        )?;

        Ok(SatellitePasses {
            catalog_number: elements.catalog_number,
            name: elements.name.clone(),
            parameters,
            passes,
        })
    };

    let workers = config.max_workers.max(1);
    let outcomes: Vec<_> = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| entries.par_iter().map(scan_one).collect()),
        Err(error) => {
            tracing::warn!(%error, "failed to build bounded worker pool; using the global pool");
            entries.par_iter().map(scan_one).collect()
        }
    };

    let mut result = BatchResult::default();
    for (entry, outcome) in entries.iter().zip(outcomes) {
        match outcome {
            Ok(satellite) => result.satellites.push(satellite),
            Err(SkywatchError::Cancelled) => result.cancelled = true,
            Err(error) => {
                tracing::warn!(
                    satellite = %entry.label,
                    %error,
                    "satellite scan failed; continuing batch"
                );
                result.failures.push(BatchFailure {
                    label: entry.label.clone(),
                    error,
                });
            }
        }
    }
    result.cancelled |= cancel.is_cancelled();
    result
}

/// [`scan_all`] with the bundled SGP4-backed oracle.
pub fn scan_all_sgp4(
    entries: &[SatelliteEntry],
    observer: &Observer,
    window_start: Epoch,
    window_end: Epoch,
    config: &BatchConfig,
    cancel: &CancelToken,
) -> BatchResult {
    scan_all(entries, observer, window_start, window_end, config, cancel, |elements| {
        Ok(Box::new(Sgp4Oracle::new(elements)?))
    })
}
