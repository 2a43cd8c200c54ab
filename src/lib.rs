//! Propeller CT/CP estimation for arbitrary diameter and pitch.
//!
//! Queries are answered from a sparse database of measured polynomial
//! curves: exact geometry hits reuse the measured curves, nearby geometries
//! with a similar pitch/diameter ratio get Reynolds-scaled curves, and
//! everything else falls back to a fixed total efficiency.

pub mod aero;
pub mod config;
pub mod error;
pub mod math;
pub mod prop;

pub use config::{ModelConfig, SearchStrategy};
pub use error::{PropError, Result};
pub use prop::{
    Accuracy, CoefficientStore, Method, OperatingPoint, PerformanceResult, PropellerModel,
    PropellerRecord,
};
