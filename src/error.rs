//! Error type shared by the store, resolver and configuration layers.

/// Errors raised at the boundaries of the propeller model.
///
/// Tier outcomes (no match, fallback estimate) are not errors; they are
/// returned as regular [`crate::prop::PerformanceResult`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum PropError {
    /// Query geometry is non-finite, non-positive, or rounds to zero millimeters.
    InvalidGeometry { diameter_mm: f64, pitch_mm: f64 },
    /// Reynolds proxy of the base record is zero or negative.
    DegenerateReynolds { re_base: f64 },
    /// A record violates the positivity or non-empty coefficient invariants.
    InvalidRecord { key: String, reason: String },
    /// Configuration value out of range.
    InvalidConfig(String),
    /// Reading a source document failed.
    Io(String),
    /// A source document could not be decoded.
    Parse(String),
}

impl std::fmt::Display for PropError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropError::InvalidGeometry { diameter_mm, pitch_mm } => write!(
                f,
                "Invalid propeller geometry: diameter={} mm, pitch={} mm",
                diameter_mm, pitch_mm
            ),
            PropError::DegenerateReynolds { re_base } => {
                write!(f, "Degenerate base Reynolds proxy: {}", re_base)
            }
            PropError::InvalidRecord { key, reason } => {
                write!(f, "Invalid propeller record {}: {}", key, reason)
            }
            PropError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PropError::Io(msg) => write!(f, "I/O error: {}", msg),
            PropError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for PropError {}

impl From<std::io::Error> for PropError {
    fn from(err: std::io::Error) -> Self {
        PropError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PropError {
    fn from(err: serde_json::Error) -> Self {
        PropError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PropError>;
