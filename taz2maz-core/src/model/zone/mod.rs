mod attribute_definition;
mod attribute_table;
mod fine_zone;
mod zone_id;

pub use attribute_definition::AttributeDefinition;
pub use attribute_table::ZoneAttributeTable;
pub use fine_zone::FineZone;
pub use zone_id::{CoarseZoneId, FineZoneId};
