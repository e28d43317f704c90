use crate::model::{segment::Segment, zone::CoarseZoneId};
use serde::{Deserialize, Serialize};

/// identifies one distribution: the fine zones of a coarse zone, weighted for a segment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub segment: Segment,
    pub coarse_zone: CoarseZoneId,
}

impl GroupKey {
    pub fn new(segment: Segment, coarse_zone: CoarseZoneId) -> GroupKey {
        GroupKey {
            segment,
            coarse_zone,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "segment '{}' in coarse zone {}",
            self.segment, self.coarse_zone
        )
    }
}
