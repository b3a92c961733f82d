//! # Pass / visibility scanner
//!
//! Walks a time window with a [`PositionOracle`], producing the chronological
//! sequence of raw [`VisibilityEvent`]s for one observer/satellite pair and
//! consolidating them into [`Pass`] records (rise → culmination → set).
//!
//! ## Algorithm
//! -----------------
//! 1. **Sampling** – topocentric elevation is sampled at a fixed step
//!    (default 30 s) across the window.
//! 2. **Event extraction** – upward/downward crossings of the minimum
//!    elevation are refined by bisection to sub-second precision and become
//!    Rise/Set events; local elevation maxima above the threshold are refined
//!    by parabolic interpolation and become Culmination events. The merged
//!    event list is sorted chronologically.
//! 3. **Consolidation** – events are scanned in order: each Rise opens a
//!    candidate pass, the highest Culmination before the next Set is kept,
//!    and the Set closes the pass. A Rise with no Set before the window ends
//!    is a truncated pass and is dropped, not reported. A Rise directly
//!    followed by another Rise is an oracle contract violation: it is logged
//!    and the earlier Rise is skipped.
//!
//! An empty result is success ("no passes in range"), never an error.

use hifitime::{Epoch, Unit};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::Degree;
use crate::observers::Observer;
use crate::oracle::PositionOracle;
use crate::scan_control::ScanControl;
use crate::skywatch_errors::SkywatchError;

/// Default elevation sampling step of the scanner, seconds.
pub const DEFAULT_STEP_SECONDS: f64 = 30.0;

/// Bisection stops once the bracket is shorter than this, seconds.
const CROSSING_TOLERANCE_SECONDS: f64 = 0.5;

/// A timestamped rise/set boundary of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventPoint {
    pub time: Epoch,
    /// Observer-relative azimuth at the event instant, degrees.
    pub azimuth_deg: Degree,
}

/// The instant of maximum elevation within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CulminationPoint {
    pub time: Epoch,
    /// Maximum elevation reached, degrees.
    pub elevation_deg: Degree,
}

/// One raw scanner event, before consolidation into passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisibilityEvent {
    Rise { time: Epoch, azimuth_deg: Degree },
    Culmination { time: Epoch, elevation_deg: Degree },
    Set { time: Epoch, azimuth_deg: Degree },
}

impl VisibilityEvent {
    pub fn time(&self) -> Epoch {
        match *self {
            VisibilityEvent::Rise { time, .. }
            | VisibilityEvent::Culmination { time, .. }
            | VisibilityEvent::Set { time, .. } => time,
        }
    }
}

/// One consolidated visibility window over an observer.
///
/// Invariant: `rise.time < culmination.time < set.time` whenever the
/// culmination is present, and `duration_minutes` is the rise→set span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    pub rise: EventPoint,
    /// Highest culmination observed between rise and set; absent for passes
    /// shorter than the sampling step.
    pub culmination: Option<CulminationPoint>,
    pub set: EventPoint,
    pub duration_minutes: f64,
}

/// Detect all complete passes of a satellite over an observer.
///
/// Convenience wrapper around [`find_passes_with`] using the default sampling
/// step and no scan limits.
pub fn find_passes(
    oracle: &dyn PositionOracle,
    observer: &Observer,
    window_start: Epoch,
    window_end: Epoch,
    min_elevation_deg: f64,
) -> Result<Vec<Pass>, SkywatchError> {
    find_passes_with(
        oracle,
        observer,
        window_start,
        window_end,
        min_elevation_deg,
        DEFAULT_STEP_SECONDS,
        &ScanControl::unbounded(),
    )
}

/// Detect all complete passes of a satellite over an observer.
///
/// Arguments
/// -----------------
/// * `oracle` – Position provider for the satellite being scanned.
/// * `observer` – Ground observer.
/// * `window_start`, `window_end` – Scan interval (UTC).
/// * `min_elevation_deg` – Visibility threshold above the local horizon.
/// * `step_seconds` – Elevation sampling step; must be positive.
/// * `control` – Cooperative cancellation/time budget, checked between
///   oracle queries.
///
/// Return
/// ----------
/// * Chronologically ordered complete passes. Zero passes is success; an
///   oracle failure or an exceeded scan limit aborts this satellite's scan.
pub fn find_passes_with(
    oracle: &dyn PositionOracle,
    observer: &Observer,
    window_start: Epoch,
    window_end: Epoch,
    min_elevation_deg: f64,
    step_seconds: f64,
    control: &ScanControl,
) -> Result<Vec<Pass>, SkywatchError> {
    let events = scan_events(
        oracle,
        observer,
        window_start,
        window_end,
        min_elevation_deg,
        step_seconds,
        control,
    )?;
    Ok(consolidate_passes(&events))
}

/// Produce the chronological raw event sequence for one observer/satellite
/// pair: threshold crossings (Rise/Set) and local maxima (Culmination).
pub fn scan_events(
    oracle: &dyn PositionOracle,
    observer: &Observer,
    window_start: Epoch,
    window_end: Epoch,
    min_elevation_deg: f64,
    step_seconds: f64,
    control: &ScanControl,
) -> Result<Vec<VisibilityEvent>, SkywatchError> {
    if window_end <= window_start {
        return Ok(Vec::new());
    }
    // Guards against a non-positive step looping forever
    let step = step_seconds.max(1e-3);

    let mut samples: Vec<(Epoch, f64)> = Vec::new();
    let mut t = window_start;
    loop {
        control.check()?;
        let topo = oracle.topocentric_at(observer, t)?;
        samples.push((t, topo.elevation_deg));
        if t >= window_end {
            break;
        }
        t = t + Unit::Second * step;
        if t > window_end {
            t = window_end;
        }
    }

    let mut events = Vec::new();

    for ((t_prev, el_prev), (t_cur, el_cur)) in samples.iter().copied().tuple_windows() {
        let was_above = el_prev >= min_elevation_deg;
        let is_above = el_cur >= min_elevation_deg;

        if !was_above && is_above {
            let time =
                refine_crossing(oracle, observer, t_prev, t_cur, min_elevation_deg, true, control)?;
            let azimuth_deg = oracle.topocentric_at(observer, time)?.azimuth_deg;
            events.push(VisibilityEvent::Rise { time, azimuth_deg });
        } else if was_above && !is_above {
            let time =
                refine_crossing(oracle, observer, t_prev, t_cur, min_elevation_deg, false, control)?;
            let azimuth_deg = oracle.topocentric_at(observer, time)?.azimuth_deg;
            events.push(VisibilityEvent::Set { time, azimuth_deg });
        }
    }

    for (a, b, c) in samples.iter().copied().tuple_windows() {
        if b.1 >= min_elevation_deg && b.1 >= a.1 && b.1 > c.1 {
            control.check()?;
            let (time, elevation_deg) = refine_peak(oracle, observer, a, b, c)?;
            events.push(VisibilityEvent::Culmination {
                time,
                elevation_deg,
            });
        }
    }

    // Consolidation requires a single chronological stream
    events.sort_by(|x, y| {
        x.time()
            .partial_cmp(&y.time())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(events)
}

/// Bisect the threshold crossing bracketed by `[lo, hi]` down to sub-second
/// precision. `rising` selects which side of the bracket is below threshold.
fn refine_crossing(
    oracle: &dyn PositionOracle,
    observer: &Observer,
    mut lo: Epoch,
    mut hi: Epoch,
    min_elevation_deg: f64,
    rising: bool,
    control: &ScanControl,
) -> Result<Epoch, SkywatchError> {
    while (hi - lo).to_unit(Unit::Second) > CROSSING_TOLERANCE_SECONDS {
        control.check()?;
        let half = (hi - lo).to_unit(Unit::Second) / 2.0;
        let mid = lo + Unit::Second * half;
        let above = oracle.topocentric_at(observer, mid)?.elevation_deg >= min_elevation_deg;
        if above == rising {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    let half = (hi - lo).to_unit(Unit::Second) / 2.0;
    Ok(lo + Unit::Second * half)
}

/// Refine a culmination from three equally spaced samples by fitting a
/// parabola through their elevations and re-querying the oracle at the
/// vertex. Falls back to the middle sample when the fit does not improve it.
fn refine_peak(
    oracle: &dyn PositionOracle,
    observer: &Observer,
    a: (Epoch, f64),
    b: (Epoch, f64),
    c: (Epoch, f64),
) -> Result<(Epoch, f64), SkywatchError> {
    let denom = a.1 - 2.0 * b.1 + c.1;
    let vertex = if denom.abs() < 1e-12 {
        b.0
    } else {
        let offset = (0.5 * (a.1 - c.1) / denom).clamp(-1.0, 1.0);
        let step_s = (c.0 - a.0).to_unit(Unit::Second) / 2.0;
        b.0 + Unit::Second * (offset * step_s)
    };

    let elevation = oracle.topocentric_at(observer, vertex)?.elevation_deg;
    if elevation >= b.1 {
        Ok((vertex, elevation))
    } else {
        Ok((b.0, b.1))
    }
}

/// Reduce a chronological event sequence to complete passes.
///
/// Scans events in order; upon a Rise, searches forward for the next Set,
/// keeping the highest Culmination seen on the way. Multiple local maxima
/// within one pass reduce to the single highest. A Rise without a following
/// Set (window truncation) is dropped. A second Rise before any Set is an
/// oracle contract violation: logged, and the earlier Rise skipped.
pub fn consolidate_passes(events: &[VisibilityEvent]) -> Vec<Pass> {
    let mut passes = Vec::new();
    let mut i = 0;

    while i < events.len() {
        let VisibilityEvent::Rise {
            time: rise_time,
            azimuth_deg: rise_azimuth,
        } = events[i]
        else {
            i += 1;
            continue;
        };

        let mut best_culmination: Option<CulminationPoint> = None;
        let mut set_point: Option<EventPoint> = None;

        let mut j = i + 1;
        while j < events.len() {
            match events[j] {
                VisibilityEvent::Culmination {
                    time,
                    elevation_deg,
                } => {
                    let improves = best_culmination
                        .as_ref()
                        .map_or(true, |b| elevation_deg > b.elevation_deg);
                    if improves {
                        best_culmination = Some(CulminationPoint {
                            time,
                            elevation_deg,
                        });
                    }
                }
                VisibilityEvent::Set { time, azimuth_deg } => {
                    set_point = Some(EventPoint { time, azimuth_deg });
                    break;
                }
                VisibilityEvent::Rise { time, .. } => {
                    tracing::warn!(
                        rise = %rise_time,
                        next_rise = %time,
                        "rise followed by another rise with no intervening set; skipping the earlier rise"
                    );
                    break;
                }
            }
            j += 1;
        }

        match set_point {
            Some(set) => {
                let duration_minutes = (set.time - rise_time).to_unit(Unit::Minute);
                passes.push(Pass {
                    rise: EventPoint {
                        time: rise_time,
                        azimuth_deg: rise_azimuth,
                    },
                    culmination: best_culmination,
                    set,
                    duration_minutes,
                });
                // Resume just after the set
                i = j + 1;
            }
            // Truncated pass or contract violation: the rise is dropped and
            // the scan resumes at whatever stopped the search.
            None => i = j,
        }
    }

    passes
}
