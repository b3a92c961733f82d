//! # Two-Line Element (TLE) Parser
//!
//! Utilities to decode **fixed-width two/three-line element sets** into typed
//! [`TleElements`] values usable by the derivation and visibility pipelines.
//!
//! ## Overview
//! -----------------
//! This module provides:
//! - A small error type [`TleParseError`] describing TLE parsing failures.
//! - The [`parse_tle`] routine that converts a two-line (or three-line, with a
//!   leading name line) element set into a [`TleElements`] record.
//! - TLE freshness grading ([`TleFreshness`]) for data-quality auditing.
//!
//! ## Units & Conventions
//! -----------------
//! - **Input format:** fixed-width ASCII lines per the TLE standard; every field
//!   lives at a fixed column offset, which is a format contract reproduced here
//!   exactly for interoperability with any TLE source.
//! - **Angles:** inclination, RAAN, argument of perigee and mean anomaly are kept
//!   in **degrees** as encoded.
//! - **Eccentricity:** reconstructed from the implied leading `0.`.
//! - **Drag term (B\*) and mean-motion second derivative:** implied-decimal
//!   mantissa with a signed power-of-ten suffix (`" 30571-3"` → `0.30571e-3`).
//! - **Epoch:** two-digit year (< 57 → 2000s, else 1900s) plus 1-based fractional
//!   day of year, converted to a UTC [`Epoch`] via [`tle_epoch_to_utc`].
//!
//! ## Error Handling
//! -----------------
//! Parsing never partially succeeds: either a complete [`TleElements`] is
//! produced or a [`TleParseError`] naming the offending field is returned,
//! wrapped into [`SkywatchError::TleParse`].

use std::ops::Range;

use hifitime::{Epoch, Unit};
use thiserror::Error;

use crate::skywatch_errors::SkywatchError;
use crate::time::tle_epoch_to_utc;

/// Minimum length of a tracked line for all fixed fields to be addressable.
const MIN_LINE_LEN: usize = 69;

/// Line-level parsing errors for two-line element sets.
#[derive(Error, Debug, PartialEq)]
pub enum TleParseError {
    #[error("element set must contain two tracked lines")]
    MissingLines,
    #[error("line {0} is shorter than 69 characters")]
    TooShortLine(u8),
    #[error("line {0} does not carry its line-number marker in column 1")]
    MissingLineMarker(u8),
    #[error("element set contains non-ASCII characters")]
    NotAscii,
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// TLE age grading used for freshness/quality auditing.
///
/// Thresholds follow the usual operational guidance: an element set under a
/// week old propagates well, one under a month is acceptable, anything older
/// should be refreshed before its predictions are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TleFreshness {
    /// Less than 7 days old.
    Fresh,
    /// Between 7 and 30 days old.
    Aging,
    /// 30 days or older.
    Stale,
}

/// Raw decoded fields of a two-line element set.
///
/// All fields are extracted from fixed character offsets of the two tracked
/// lines. A value of this type is immutable once parsed; derivation and
/// scanning never mutate it.
///
/// The two source lines are retained verbatim so the record can be handed to
/// an SGP4-class propagator without re-serializing.
#[derive(Debug, Clone, PartialEq)]
pub struct TleElements {
    /// Satellite name from an optional leading name line.
    pub name: Option<String>,
    /// NORAD catalog number.
    pub catalog_number: u32,
    /// Security classification marker (`U`, `C` or `S`).
    pub classification: char,
    /// International designator (launch year, launch number, piece).
    pub international_designator: String,
    /// Two-digit epoch year as encoded.
    pub epoch_year: u32,
    /// Fractional day of year, 1-based.
    pub epoch_day: f64,
    /// Absolute epoch instant (UTC).
    pub epoch: Epoch,
    /// First derivative of mean motion, rev/day².
    pub mean_motion_dot: f64,
    /// Second derivative of mean motion, rev/day³ (implied-decimal encoding).
    pub mean_motion_ddot: f64,
    /// B* drag term, 1/Earth radii (implied-decimal encoding).
    pub bstar: f64,
    /// Element set number.
    pub element_set_number: u32,
    /// Inclination in degrees.
    pub inclination_deg: f64,
    /// Right ascension of the ascending node in degrees.
    pub raan_deg: f64,
    /// Eccentricity, unitless, in [0, 1).
    pub eccentricity: f64,
    /// Argument of perigee in degrees.
    pub arg_perigee_deg: f64,
    /// Mean anomaly in degrees.
    pub mean_anomaly_deg: f64,
    /// Mean motion in revolutions per day.
    pub mean_motion: f64,
    /// Revolution number at epoch.
    pub revolution_number: u32,
    /// First tracked line, verbatim.
    pub line1: String,
    /// Second tracked line, verbatim.
    pub line2: String,
}

impl TleElements {
    /// Elapsed days between `now` and the record epoch (negative if the epoch
    /// lies in the future of `now`).
    pub fn age_days(&self, now: Epoch) -> f64 {
        (now - self.epoch).to_unit(Unit::Day)
    }

    /// Grade the record age against the usual freshness thresholds.
    pub fn freshness(&self, now: Epoch) -> TleFreshness {
        let age = self.age_days(now);
        if age < 7.0 {
            TleFreshness::Fresh
        } else if age < 30.0 {
            TleFreshness::Aging
        } else {
            TleFreshness::Stale
        }
    }

    /// Whole orbital revolutions per day, truncated from the mean motion.
    pub fn orbits_per_day(&self) -> u32 {
        self.mean_motion as u32
    }
}

/// Extract a fixed-column field from a tracked line.
///
/// Bounds are guaranteed by the upfront length check in [`parse_tle`].
fn field<'a>(line: &'a str, range: Range<usize>) -> &'a str {
    line[range].trim()
}

fn parse_field_f64(line: &str, range: Range<usize>, name: &'static str) -> Result<f64, TleParseError> {
    let raw = field(line, range);
    raw.parse::<f64>().map_err(|_| TleParseError::InvalidField {
        field: name,
        value: raw.to_string(),
    })
}

fn parse_field_u32(line: &str, range: Range<usize>, name: &'static str) -> Result<u32, TleParseError> {
    let raw = field(line, range);
    raw.parse::<u32>().map_err(|_| TleParseError::InvalidField {
        field: name,
        value: raw.to_string(),
    })
}

/// Decode a TLE implied-decimal field with power-of-ten suffix.
///
/// The mantissa digits are read as `0.mantissa` and the trailing two characters
/// are a signed power-of-ten exponent applied to it, so `" 30571-3"` decodes to
/// `0.30571e-3`. A blank field decodes to `0.0` (satellites with no published
/// drag solution leave it empty).
fn parse_implied_decimal(
    line: &str,
    range: Range<usize>,
    name: &'static str,
) -> Result<f64, TleParseError> {
    let raw = &line[range];
    if raw.trim().is_empty() {
        return Ok(0.0);
    }

    let split = raw.len() - 2;
    let invalid = || TleParseError::InvalidField {
        field: name,
        value: raw.to_string(),
    };

    let mantissa = raw[..split].trim().parse::<f64>().map_err(|_| invalid())? / 1.0e5;
    let exponent = raw[split..].trim().parse::<i32>().map_err(|_| invalid())?;

    Ok(mantissa * 10f64.powi(exponent))
}

/// Structural well-formedness check for one tracked line.
fn check_line(line: &str, marker: char, index: u8) -> Result<(), TleParseError> {
    if !line.is_ascii() {
        return Err(TleParseError::NotAscii);
    }
    if line.len() < MIN_LINE_LEN {
        return Err(TleParseError::TooShortLine(index));
    }
    if !line.starts_with(marker) {
        return Err(TleParseError::MissingLineMarker(index));
    }
    Ok(())
}

/// Parse a two-line (or three-line) element set into a [`TleElements`] record.
///
/// The input may carry a leading name line; surrounding blank lines and `\r`
/// line endings are tolerated. Both tracked lines must pass the structural
/// check (length ≥ 69, line-number marker in column 1) before any field is
/// extracted.
///
/// Arguments
/// -----------------
/// * `text` – The element set as text, two or three lines.
///
/// Return
/// ----------
/// * A complete [`TleElements`] or a [`SkywatchError::TleParse`] naming the
///   field that failed. Parsing never partially succeeds.
pub fn parse_tle(text: &str) -> Result<TleElements, SkywatchError> {
    let mut lines = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty());

    let first = lines.next().ok_or(TleParseError::MissingLines)?;

    // A leading line that does not start with the line-1 marker is a name line.
    let (name, line1) = if first.starts_with('1') && first.len() >= MIN_LINE_LEN {
        (None, first)
    } else {
        let line1 = lines.next().ok_or(TleParseError::MissingLines)?;
        let name = first.trim().trim_start_matches("0 ").trim().to_string();
        (Some(name), line1)
    };
    let line2 = lines.next().ok_or(TleParseError::MissingLines)?;

    check_line(line1, '1', 1)?;
    check_line(line2, '2', 2)?;

    let catalog_number = parse_field_u32(line1, 2..7, "catalog number")?;
    let classification = line1.as_bytes()[7] as char;
    let international_designator = field(line1, 9..17).to_string();

    let epoch_year = parse_field_u32(line1, 18..20, "epoch year")?;
    let epoch_day = parse_field_f64(line1, 20..32, "epoch day")?;
    let epoch = tle_epoch_to_utc(epoch_year, epoch_day);

    let mean_motion_dot = parse_field_f64(line1, 33..43, "mean motion first derivative")?;
    let mean_motion_ddot = parse_implied_decimal(line1, 44..52, "mean motion second derivative")?;
    let bstar = parse_implied_decimal(line1, 53..61, "drag term")?;
    let element_set_number = parse_field_u32(line1, 64..68, "element set number")?;

    let inclination_deg = parse_field_f64(line2, 8..16, "inclination")?;
    let raan_deg = parse_field_f64(line2, 17..25, "right ascension of ascending node")?;

    let ecc_digits = field(line2, 26..33);
    let eccentricity = format!("0.{ecc_digits}")
        .parse::<f64>()
        .map_err(|_| TleParseError::InvalidField {
            field: "eccentricity",
            value: ecc_digits.to_string(),
        })?;

    let arg_perigee_deg = parse_field_f64(line2, 34..42, "argument of perigee")?;
    let mean_anomaly_deg = parse_field_f64(line2, 43..51, "mean anomaly")?;
    let mean_motion = parse_field_f64(line2, 52..63, "mean motion")?;
    let revolution_number = parse_field_u32(line2, 63..68, "revolution number")?;

    Ok(TleElements {
        name,
        catalog_number,
        classification,
        international_designator,
        epoch_year,
        epoch_day,
        epoch,
        mean_motion_dot,
        mean_motion_ddot,
        bstar,
        element_set_number,
        inclination_deg,
        raan_deg,
        eccentricity,
        arg_perigee_deg,
        mean_anomaly_deg,
        mean_motion,
        revolution_number,
        line1: line1.to_string(),
        line2: line2.to_string(),
    })
}
