mod coefficient_table;
mod income_category;
mod segment_classifier;
mod segment_key;

pub use coefficient_table::{SegmentCoefficientRecord, SegmentCoefficientTable, SegmentCoefficients};
pub use income_category::IncomeCategory;
pub use segment_classifier::SegmentClassifier;
pub use segment_key::Segment;
