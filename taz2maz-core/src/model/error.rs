use crate::model::{probability::GroupKey, segment::Segment, zone::FineZoneId};

#[derive(thiserror::Error, Debug)]
pub enum DisaggregationError {
    #[error("trip {trip_index} references segment '{segment}' which has no entry in the size coefficient table")]
    ConfigurationError { segment: Segment, trip_index: usize },
    #[error("no fine zone distribution exists for {key}{}", trip_suffix(.trip_index))]
    MappingError {
        key: GroupKey,
        trip_index: Option<usize>,
    },
    #[error("fine zone {fine_zone} has invalid size {size} for segment '{segment}', sizes must be non-negative")]
    InvalidSize {
        segment: Segment,
        fine_zone: FineZoneId,
        size: f64,
    },
    #[error("failure building disaggregation model: {0}")]
    BuildError(String),
}

fn trip_suffix(trip_index: &Option<usize>) -> String {
    match trip_index {
        Some(idx) => format!(" (trip {idx})"),
        None => String::new(),
    }
}
