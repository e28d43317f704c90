use super::Segment;
use crate::model::DisaggregationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// one row of size-term coefficients: the purpose, its sub-segment, and a weight per
/// attribute name.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SegmentCoefficientRecord {
    pub purpose: String,
    pub segment: String,
    pub weights: IndexMap<String, f64>,
}

impl SegmentCoefficientRecord {
    pub fn segment_key(&self) -> Segment {
        Segment::from_purpose_and_subsegment(&self.purpose, &self.segment)
    }
}

/// attribute weights of a single segment.
#[derive(Clone, Debug, Default)]
pub struct SegmentCoefficients {
    pub weights: IndexMap<String, f64>,
}

/// weight vectors for the closed set of segments known to the model.
#[derive(Clone, Debug, Default)]
pub struct SegmentCoefficientTable(IndexMap<Segment, SegmentCoefficients>);

impl SegmentCoefficientTable {
    pub fn get(&self, segment: &Segment) -> Option<&SegmentCoefficients> {
        self.0.get(segment)
    }

    pub fn contains(&self, segment: &Segment) -> bool {
        self.0.contains_key(segment)
    }

    /// segments in the order their rows were supplied.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Segment, &SegmentCoefficients)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&[SegmentCoefficientRecord]> for SegmentCoefficientTable {
    type Error = DisaggregationError;

    fn try_from(records: &[SegmentCoefficientRecord]) -> Result<Self, Self::Error> {
        let mut table: IndexMap<Segment, SegmentCoefficients> = IndexMap::new();
        for record in records.iter() {
            let key = record.segment_key();
            let coefficients = SegmentCoefficients {
                weights: record.weights.clone(),
            };
            if let Some(weight) = coefficients.weights.values().find(|w| !w.is_finite()) {
                return Err(DisaggregationError::BuildError(format!(
                    "segment '{key}' has non-finite coefficient {weight}"
                )));
            }
            if table.insert(key.clone(), coefficients).is_some() {
                return Err(DisaggregationError::BuildError(format!(
                    "segment '{key}' appears more than once in the size coefficient table"
                )));
            }
        }
        Ok(SegmentCoefficientTable(table))
    }
}
