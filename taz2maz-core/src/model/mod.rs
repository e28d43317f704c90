pub mod error;
pub mod pipeline;
pub mod probability;
pub mod sampling;
pub mod segment;
pub mod size_term;
pub mod trip;
pub mod zone;

pub use error::DisaggregationError;
