use crate::model::{probability::GroupKey, segment::Segment, zone::FineZoneId};
use std::collections::HashMap;

/// size of one fine zone for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneSize {
    pub fine_zone: FineZoneId,
    pub size: f64,
}

/// fine zone sizes grouped by (segment, coarse zone). groups whose sizes summed to zero
/// have already had the substitute value applied and are listed in `degenerate_groups`.
#[derive(Clone, Debug, Default)]
pub struct SizeTable {
    pub segments: Vec<Segment>,
    pub groups: HashMap<GroupKey, Vec<ZoneSize>>,
    pub degenerate_groups: Vec<GroupKey>,
}

impl SizeTable {
    pub fn get(&self, key: &GroupKey) -> Option<&[ZoneSize]> {
        self.groups.get(key).map(|g| g.as_slice())
    }

    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn is_degenerate(&self, key: &GroupKey) -> bool {
        self.degenerate_groups.binary_search(key).is_ok()
    }
}
