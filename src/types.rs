use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time precision for timestamp parsing and delta computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Precision {
    Seconds,
    Milliseconds,
    #[default]
    Microseconds,
    Nanoseconds,
}

impl Precision {
    /// Length of one tick at this precision, in seconds
    pub fn scale(&self) -> f64 {
        match self {
            Precision::Seconds => 1.0,
            Precision::Milliseconds => 1e-3,
            Precision::Microseconds => 1e-6,
            Precision::Nanoseconds => 1e-9,
        }
    }
}

impl FromStr for Precision {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Precision::Seconds),
            "ms" => Ok(Precision::Milliseconds),
            "us" => Ok(Precision::Microseconds),
            "ns" => Ok(Precision::Nanoseconds),
            _ => Err(MetadataError::TimeParsing(format!(
                "unrecognized precision '{}', expected one of s, ms, us, ns",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Seconds => write!(f, "s"),
            Precision::Milliseconds => write!(f, "ms"),
            Precision::Microseconds => write!(f, "us"),
            Precision::Nanoseconds => write!(f, "ns"),
        }
    }
}

/// Error types for metadata handling
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Time parsing error: {0}")]
    TimeParsing(String),

    #[error("XML parsing error: {0}")]
    XmlParsing(String),
}

/// Result type for metadata operations
pub type MetaResult<T> = Result<T, MetadataError>;
