mod disaggregated_trip;
mod trip_record;

pub use disaggregated_trip::DisaggregatedTrip;
pub use trip_record::Trip;
