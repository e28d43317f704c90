use super::{CoarseZoneId, FineZone, FineZoneId};
use crate::model::DisaggregationError;
use std::collections::{BTreeSet, HashMap, HashSet};

/// the land-use attributes of every fine zone along with the coarse zone that owns it.
/// immutable once built.
#[derive(Clone, Debug)]
pub struct ZoneAttributeTable {
    attribute_names: Vec<String>,
    attribute_lookup: HashMap<String, usize>,
    zones: Vec<FineZone>,
}

impl ZoneAttributeTable {
    /// builds a table, confirming that every zone carries one value per attribute name
    /// and that fine zone ids are unique.
    pub fn new(
        attribute_names: Vec<String>,
        zones: Vec<FineZone>,
    ) -> Result<ZoneAttributeTable, DisaggregationError> {
        let mut attribute_lookup = HashMap::with_capacity(attribute_names.len());
        for (idx, name) in attribute_names.iter().enumerate() {
            if attribute_lookup.insert(name.clone(), idx).is_some() {
                return Err(DisaggregationError::BuildError(format!(
                    "attribute '{name}' appears more than once in the zone attribute table"
                )));
            }
        }

        let mut seen: HashSet<FineZoneId> = HashSet::with_capacity(zones.len());
        for zone in zones.iter() {
            if zone.attributes.len() != attribute_names.len() {
                return Err(DisaggregationError::BuildError(format!(
                    "fine zone {} has {} attribute values, expected {}",
                    zone.id,
                    zone.attributes.len(),
                    attribute_names.len()
                )));
            }
            if !seen.insert(zone.id) {
                return Err(DisaggregationError::BuildError(format!(
                    "fine zone {} appears more than once in the zone attribute table",
                    zone.id
                )));
            }
        }

        Ok(ZoneAttributeTable {
            attribute_names,
            attribute_lookup,
            zones,
        })
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attribute_lookup.get(name).copied()
    }

    pub fn zones(&self) -> &[FineZone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// the distinct coarse zones that own at least one fine zone, ascending.
    pub fn coarse_zones(&self) -> BTreeSet<CoarseZoneId> {
        self.zones.iter().map(|z| z.coarse_zone).collect()
    }
}
