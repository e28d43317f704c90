use serde::{Deserialize, Serialize};

/// a market segment: a trip purpose, optionally crossed with an income category.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(pub String);

impl Segment {
    /// the key of a coefficient table row. a row whose purpose and sub-segment match
    /// describes a purpose that is not further segmented.
    pub fn from_purpose_and_subsegment(purpose: &str, subsegment: &str) -> Segment {
        if purpose == subsegment {
            Segment(purpose.to_string())
        } else {
            Segment(format!("{purpose}_{subsegment}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment(value.to_string())
    }
}
