use super::{AppError, ColumnRemap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// how the disaggregated trip list is written. by default every input column is
/// written, followed by the sampled origin and destination fine zones.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct OutputLayout {
    #[serde(default = "default_origin_fine_zone_column")]
    pub origin_fine_zone_column: String,
    #[serde(default = "default_destination_fine_zone_column")]
    pub destination_fine_zone_column: String,
    /// ordered selection of output columns. a source may name an input column, one of
    /// the fine zone columns or a constant.
    #[serde(default)]
    pub columns: Option<Vec<OutputColumn>>,
    /// fixed-valued columns. those not placed by `columns` are appended at the end.
    #[serde(default)]
    pub constants: IndexMap<String, String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct OutputColumn {
    pub source: String,
    /// output name, if different from the source
    pub target: Option<String>,
}

/// where each output field comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldSource {
    Input {
        index: usize,
        remap: Option<ColumnRemap>,
    },
    OriginFineZone,
    DestinationFineZone,
    Constant(String),
}

/// an [`OutputLayout`] resolved against a trip file header.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputPlan {
    pub header: Vec<String>,
    pub fields: Vec<FieldSource>,
}

impl Default for OutputLayout {
    fn default() -> Self {
        OutputLayout {
            origin_fine_zone_column: default_origin_fine_zone_column(),
            destination_fine_zone_column: default_destination_fine_zone_column(),
            columns: None,
            constants: IndexMap::new(),
        }
    }
}

impl OutputLayout {
    pub fn plan(
        &self,
        input_header: &[String],
        remaps: &[ColumnRemap],
    ) -> Result<OutputPlan, AppError> {
        let selection: Vec<(String, String)> = match &self.columns {
            Some(columns) => columns
                .iter()
                .map(|c| {
                    let target = c.target.clone().unwrap_or_else(|| c.source.clone());
                    (c.source.clone(), target)
                })
                .collect(),
            None => input_header
                .iter()
                .chain([
                    &self.origin_fine_zone_column,
                    &self.destination_fine_zone_column,
                ])
                .map(|c| (c.clone(), c.clone()))
                .collect(),
        };

        for remap in remaps.iter() {
            if !input_header.contains(&remap.column) {
                return Err(AppError::InvalidUserInput(format!(
                    "remap column '{}' is not in the trip file",
                    remap.column
                )));
            }
        }

        let mut header = Vec::with_capacity(selection.len() + self.constants.len());
        let mut fields = Vec::with_capacity(selection.len() + self.constants.len());
        let mut placed_constants = HashSet::new();
        for (source, target) in selection.into_iter() {
            let field = if source == self.origin_fine_zone_column {
                FieldSource::OriginFineZone
            } else if source == self.destination_fine_zone_column {
                FieldSource::DestinationFineZone
            } else if let Some(value) = self.constants.get(&source) {
                placed_constants.insert(source.clone());
                FieldSource::Constant(value.clone())
            } else {
                let index = input_header
                    .iter()
                    .position(|h| *h == source)
                    .ok_or_else(|| {
                        AppError::InvalidUserInput(format!(
                            "output column '{source}' is not in the trip file"
                        ))
                    })?;
                let remap = remaps.iter().find(|r| r.column == source).cloned();
                FieldSource::Input { index, remap }
            };
            header.push(target);
            fields.push(field);
        }
        for (name, value) in self.constants.iter() {
            if placed_constants.contains(name) {
                continue;
            }
            header.push(name.clone());
            fields.push(FieldSource::Constant(value.clone()));
        }

        Ok(OutputPlan { header, fields })
    }
}

fn default_origin_fine_zone_column() -> String {
    String::from("OMAZ")
}

fn default_destination_fine_zone_column() -> String {
    String::from("DMAZ")
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn input_header() -> Vec<String> {
        ["hh_id", "orig_purpose", "depart_hour"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_default_appends_fine_zones() {
        let plan = OutputLayout::default()
            .plan(&input_header(), &[])
            .expect("plan should resolve");
        assert_eq!(
            plan.header,
            vec!["hh_id", "orig_purpose", "depart_hour", "OMAZ", "DMAZ"]
        );
        assert_eq!(plan.fields[3], FieldSource::OriginFineZone);
        assert_eq!(plan.fields[4], FieldSource::DestinationFineZone);
    }

    #[test]
    fn test_selection_rename_remap_and_constants() {
        let layout: OutputLayout = toml::from_str(
            r#"
            origin_fine_zone_column = "orig_mgra"
            destination_fine_zone_column = "dest_mgra"
            columns = [
                { source = "hh_id" },
                { source = "orig_mgra" },
                { source = "dest_mgra" },
                { source = "depart_hour", target = "stop_period" },
                { source = "set" },
                { source = "orig_purpose" },
            ]
            constants = { TRIP_TIME = "0", set = "-1" }
            "#,
        )
        .expect("layout should parse");
        let remap = ColumnRemap {
            column: String::from("orig_purpose"),
            values: HashMap::from([(String::from("eatout"), String::from("Eating Out"))]),
        };
        let plan = layout
            .plan(&input_header(), &[remap.clone()])
            .expect("plan should resolve");
        assert_eq!(
            plan.header,
            vec![
                "hh_id",
                "orig_mgra",
                "dest_mgra",
                "stop_period",
                "set",
                "orig_purpose",
                "TRIP_TIME"
            ]
        );
        assert_eq!(
            plan.fields[3],
            FieldSource::Input {
                index: 2,
                remap: None
            }
        );
        assert_eq!(plan.fields[4], FieldSource::Constant(String::from("-1")));
        assert_eq!(
            plan.fields[5],
            FieldSource::Input {
                index: 1,
                remap: Some(remap)
            }
        );
        assert_eq!(plan.fields[6], FieldSource::Constant(String::from("0")));
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let layout = OutputLayout {
            columns: Some(vec![OutputColumn {
                source: String::from("parking_taz"),
                target: None,
            }]),
            ..Default::default()
        };
        assert!(layout.plan(&input_header(), &[]).is_err());
    }
}
