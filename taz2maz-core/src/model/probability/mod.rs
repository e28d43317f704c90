mod cumulative_distribution;
mod group_key;
mod probability_model;

pub use cumulative_distribution::{build_distribution, CumulativeDistribution};
pub use group_key::GroupKey;
pub use probability_model::ProbabilityModel;
