mod disaggregation_config;
mod disaggregation_pipeline;
mod disaggregation_result;
mod unmapped_trip_policy;

pub use disaggregation_config::DisaggregationConfig;
pub use disaggregation_pipeline::DisaggregationPipeline;
pub use disaggregation_result::{DisaggregationResult, UnmappedTrip};
pub use unmapped_trip_policy::UnmappedTripPolicy;
