pub mod model;

pub use model::{ModelConfig, SearchStrategy};
