use crate::model::{probability::GroupKey, trip::DisaggregatedTrip};

/// a trip end that could not be mapped to a distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct UnmappedTrip {
    pub trip_index: usize,
    pub key: GroupKey,
}

#[derive(Clone, Debug, Default)]
pub struct DisaggregationResult<'a> {
    /// sampled trips in trip-list order
    pub trips: Vec<DisaggregatedTrip<'a>>,
    /// trips dropped under [`super::UnmappedTripPolicy::Skip`]
    pub unmapped: Vec<UnmappedTrip>,
}
