use crate::model::DisaggregationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// a size-term attribute derived from raw land-use columns by summation. an empty
/// column list produces an attribute that is always zero.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl AttributeDefinition {
    pub fn new(name: &str, columns: &[&str]) -> AttributeDefinition {
        AttributeDefinition {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// finds the position of each source column in a header lookup.
    pub fn column_indices(
        &self,
        header: &HashMap<String, usize>,
    ) -> Result<Vec<usize>, DisaggregationError> {
        self.columns
            .iter()
            .map(|col| {
                header.get(col).copied().ok_or_else(|| {
                    DisaggregationError::BuildError(format!(
                        "attribute '{}' requires column '{col}' which is missing from the zone data",
                        self.name
                    ))
                })
            })
            .collect()
    }

    /// sums the values at the resolved column positions.
    pub fn evaluate(indices: &[usize], row: &[f64]) -> f64 {
        indices.iter().map(|idx| row[*idx]).sum()
    }

    /// the land-use categories used by the travel model one size terms.
    pub fn travel_model_one_defaults() -> Vec<AttributeDefinition> {
        vec![
            AttributeDefinition::new("TOTHH", &["HH"]),
            AttributeDefinition::new("RETEMPN", &["emp_personal_svcs_retail", "emp_retail"]),
            AttributeDefinition::new("FPSEMPN", &["emp_prof_bus_svcs"]),
            AttributeDefinition::new(
                "HEREMPN",
                &[
                    "emp_amusement",
                    "emp_restaurant_bar",
                    "emp_pvt_ed_post_k12_oth",
                    "emp_public_ed",
                    "emp_health",
                    "emp_hotel",
                    "emp_personal_svcs_retail",
                ],
            ),
            AttributeDefinition::new(
                "OTHEMPN",
                &[
                    "emp_const_non_bldg_prod",
                    "emp_state_local_gov_ent",
                    "emp_prof_bus_svcs",
                ],
            ),
            AttributeDefinition::new("AGREMPN", &["emp_ag", "emp_const_non_bldg_prod"]),
            AttributeDefinition::new(
                "MWTEMPN",
                &[
                    "emp_whsle_whs",
                    "emp_mfg_prod",
                    "emp_trans",
                    "emp_utilities_prod",
                ],
            ),
            AttributeDefinition::new("HSENROLL", &["EnrollGrade9to12"]),
            AttributeDefinition::new("COLLFTE", &["collegeEnroll"]),
            AttributeDefinition::new("COLLPTE", &["otherCollegeEnroll", "AdultSchEnrl"]),
            AttributeDefinition::new("AGE0519", &[]),
            AttributeDefinition::new("TOTEMP", &["emp_total"]),
        ]
    }
}
