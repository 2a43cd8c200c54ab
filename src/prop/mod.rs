pub mod evaluator;
pub mod index;
pub mod model;
pub mod record;
pub mod resolver;
pub mod result;
pub mod scaling;
pub mod stats;
pub mod store;

pub use evaluator::{compute_efficiency, compute_power, compute_thrust, OperatingPoint};
pub use index::GeometryIndex;
pub use model::PropellerModel;
pub use record::{GeometryKey, PropellerRecord, DEFAULT_ADVANCE_RATIO_RANGE};
pub use resolver::{Candidate, MatchResolver};
pub use result::{Accuracy, ExactMatch, FallbackEstimate, Method, PerformanceResult, ScaledMatch};
pub use scaling::{FlowRegime, ReynoldsScaling, ScaledCoefficients};
pub use stats::{Statistics, StatisticsCounts, StatisticsReport};
pub use store::CoefficientStore;
