//! # Skywatch: satellite visibility and TLE drift analysis
//!
//! `skywatch` is the computational core of a satellite tracking service: it
//! decodes two-line element sets, derives their physical orbit parameters,
//! detects visibility passes (rise → culmination → set) over a ground
//! observer, answers region-presence queries against a geographic bounding
//! box, and audits element-set drift between epochs.
//!
//! Orbital propagation itself is delegated to an SGP4-class provider behind
//! the [`PositionOracle`](crate::oracle::PositionOracle) contract; the crate
//! ships an adapter backed by the `sgp4` crate and otherwise takes plain
//! values in and returns plain values out, leaving persistence and transport
//! to its callers.

pub mod batch;
pub mod constants;
pub mod observers;
pub mod oracle;
pub mod orbital_params;
pub mod region;
pub mod result_cache;
pub mod scan_control;
pub mod sgp4_oracle;
pub mod skywatch_errors;
pub mod time;
pub mod tle;
pub mod tle_history;
pub mod visibility;

pub use crate::batch::{scan_all, scan_all_sgp4, BatchConfig, BatchResult, SatelliteEntry};
pub use crate::observers::Observer;
pub use crate::oracle::{PositionOracle, SubPoint, Topocentric};
pub use crate::orbital_params::{DerivedParameters, OrbitClass};
pub use crate::region::{find_region_entries, BoundingBox, RegionEntry};
pub use crate::result_cache::{PassQueryKey, ResultCache};
pub use crate::scan_control::{CancelToken, ScanControl};
pub use crate::sgp4_oracle::Sgp4Oracle;
pub use crate::skywatch_errors::SkywatchError;
pub use crate::tle::{parse_tle, TleElements, TleFreshness};
pub use crate::tle_history::{compare, compare_texts, TleComparison};
pub use crate::visibility::{find_passes, find_passes_with, Pass};
