use super::UnmappedTripPolicy;
use crate::model::size_term::DEFAULT_ZERO_SIZE_SUBSTITUTE;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DisaggregationConfig {
    /// seed of the draw stream
    #[serde(default)]
    pub seed: u64,
    /// size assigned to each fine zone of a group whose sizes total zero
    #[serde(default = "default_zero_size_substitute")]
    pub zero_size_substitute: f64,
    #[serde(default)]
    pub on_unmapped: UnmappedTripPolicy,
    /// the purpose whose segments are crossed with household income
    #[serde(default = "default_income_segmented_purpose")]
    pub income_segmented_purpose: String,
}

impl Default for DisaggregationConfig {
    fn default() -> Self {
        DisaggregationConfig {
            seed: 0,
            zero_size_substitute: default_zero_size_substitute(),
            on_unmapped: UnmappedTripPolicy::default(),
            income_segmented_purpose: default_income_segmented_purpose(),
        }
    }
}

fn default_zero_size_substitute() -> f64 {
    DEFAULT_ZERO_SIZE_SUBSTITUTE
}

fn default_income_segmented_purpose() -> String {
    String::from("work")
}
