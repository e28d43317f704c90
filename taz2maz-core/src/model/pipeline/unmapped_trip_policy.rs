use serde::{Deserialize, Serialize};

/// what to do with a trip whose (segment, coarse zone) has no distribution.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedTripPolicy {
    /// abort the run, producing no output.
    #[default]
    Fail,
    /// drop the trip from the output and log it. the trip still consumes its draws.
    Skip,
}
