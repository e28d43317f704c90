use super::Trip;
use crate::model::{segment::Segment, zone::FineZoneId};

/// a trip with its sampled fine zones appended.
#[derive(Clone, Debug, PartialEq)]
pub struct DisaggregatedTrip<'a> {
    pub trip_index: usize,
    pub trip: &'a Trip,
    pub origin_segment: Segment,
    pub destination_segment: Segment,
    pub origin_fine_zone: FineZoneId,
    pub destination_fine_zone: FineZoneId,
}
