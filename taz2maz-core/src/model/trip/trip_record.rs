use crate::model::zone::CoarseZoneId;

/// one trip of the coarse-zone trip list with household income already joined.
/// `pass_through` carries the remaining input fields untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub household_id: String,
    pub origin_zone: CoarseZoneId,
    pub destination_zone: CoarseZoneId,
    pub origin_purpose: String,
    pub destination_purpose: String,
    pub income: f64,
    pub pass_through: Vec<String>,
}
