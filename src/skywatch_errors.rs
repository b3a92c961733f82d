use thiserror::Error;

use crate::tle::TleParseError;

/// Which side of a TLE history comparison failed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSide {
    Current,
    Previous,
}

impl std::fmt::Display for ComparisonSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonSide::Current => write!(f, "current"),
            ComparisonSide::Previous => write!(f, "previous"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SkywatchError {
    #[error("Invalid TLE text: {0}")]
    TleParse(#[from] TleParseError),

    #[error("Non-physical mean motion: {0} rev/day")]
    NonPositiveMeanMotion(f64),

    #[error("Propagation failed: {0}")]
    Propagation(String),

    #[error("Position oracle contract violation: {0}")]
    OracleContract(String),

    #[error("Scan exceeded its time budget and was abandoned")]
    ScanTimeout,

    #[error("Scan cancelled by caller")]
    Cancelled,

    #[error("Comparison failed on the {side} element set: {source}")]
    Comparison {
        side: ComparisonSide,
        #[source]
        source: Box<SkywatchError>,
    },
}

impl PartialEq for SkywatchError {
    fn eq(&self, other: &Self) -> bool {
        use SkywatchError::*;
        match (self, other) {
            (TleParse(a), TleParse(b)) => a == b,
            (NonPositiveMeanMotion(a), NonPositiveMeanMotion(b)) => a == b,
            (Propagation(a), Propagation(b)) => a == b,
            (OracleContract(a), OracleContract(b)) => a == b,

            // Unit variants
            (ScanTimeout, ScanTimeout) => true,
            (Cancelled, Cancelled) => true,

            (
                Comparison { side: sa, source: a },
                Comparison { side: sb, source: b },
            ) => sa == sb && a == b,

            _ => false,
        }
    }
}
