pub mod atmosphere;

pub use atmosphere::Atmosphere;
