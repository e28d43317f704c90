use super::{CoarseZoneId, FineZoneId};

/// land-use record of a single fine zone. attribute values are ordered by the
/// attribute names of the owning [`super::ZoneAttributeTable`].
#[derive(Clone, Debug)]
pub struct FineZone {
    pub id: FineZoneId,
    pub coarse_zone: CoarseZoneId,
    pub attributes: Vec<f64>,
}

impl FineZone {
    pub fn new(id: FineZoneId, coarse_zone: CoarseZoneId, attributes: Vec<f64>) -> FineZone {
        FineZone {
            id,
            coarse_zone,
            attributes,
        }
    }
}
