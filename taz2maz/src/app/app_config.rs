use super::{AppError, ColumnRemap, OutputLayout, TripFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use taz2maz_core::model::{pipeline::DisaggregationConfig, zone::AttributeDefinition};

/// top-level TOML configuration of a disaggregation run. relative file paths are
/// resolved against the directory holding the configuration file.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AppConfig {
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    #[serde(default)]
    pub zone_columns: ZoneColumns,
    #[serde(default)]
    pub trip_columns: TripColumns,
    #[serde(default)]
    pub household_columns: HouseholdColumns,
    /// size-term attributes derived from the zone data. defaults to the travel model
    /// one land-use categories.
    #[serde(default = "AttributeDefinition::travel_model_one_defaults")]
    pub attributes: Vec<AttributeDefinition>,
    /// applied to trip rows before segments are assigned or draws are taken
    #[serde(default)]
    pub trip_filters: Vec<TripFilter>,
    /// value replacements applied to output columns
    #[serde(default)]
    pub remap: Vec<ColumnRemap>,
    #[serde(default)]
    pub output: OutputLayout,
    #[serde(default)]
    pub disaggregation: DisaggregationConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct InputFiles {
    /// rows of purpose, segment and one weight column per attribute
    pub size_coefficients_file: String,
    /// fine zone land-use data
    pub zone_data_file: String,
    /// optional fine zone to coarse zone crosswalk. when present, zones missing from it
    /// are dropped.
    pub zone_crosswalk_file: Option<String>,
    /// optional renumbering of zone data keys into output fine zone ids. zones missing
    /// from it are dropped.
    pub zone_id_crosswalk_file: Option<String>,
    pub households_file: String,
    pub trips_file: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct OutputFiles {
    pub trips_file: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ZoneColumns {
    /// output fine zone id. also the join key when `source_zone` is not set.
    #[serde(default = "default_fine_zone_column")]
    pub fine_zone: String,
    #[serde(default = "default_coarse_zone_column")]
    pub coarse_zone: String,
    /// zone id that joins the zone data to the crosswalks when fine zones are
    /// renumbered through a zone id crosswalk (e.g. `MAZ_ORIGINAL`)
    #[serde(default)]
    pub source_zone: Option<String>,
}

impl ZoneColumns {
    /// the column that identifies zone data rows in the zone data and crosswalk files.
    pub fn key_column(&self) -> &str {
        self.source_zone.as_deref().unwrap_or(&self.fine_zone)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct TripColumns {
    #[serde(default = "default_household_id_column")]
    pub household_id: String,
    #[serde(default = "default_origin_zone_column")]
    pub origin_zone: String,
    #[serde(default = "default_destination_zone_column")]
    pub destination_zone: String,
    #[serde(default = "default_origin_purpose_column")]
    pub origin_purpose: String,
    #[serde(default = "default_destination_purpose_column")]
    pub destination_purpose: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct HouseholdColumns {
    #[serde(default = "default_household_id_column")]
    pub household_id: String,
    #[serde(default = "default_income_column")]
    pub income: String,
}

impl AppConfig {
    /// reads a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<AppConfig, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| AppError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config: AppConfig =
            toml::from_str(&contents).map_err(|e| AppError::ReadError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// prefixes every relative input and output path with `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut String| {
            let candidate = Path::new(p.as_str());
            if candidate.is_relative() {
                *p = base.join(candidate).to_string_lossy().to_string();
            }
        };
        resolve(&mut self.inputs.size_coefficients_file);
        resolve(&mut self.inputs.zone_data_file);
        if let Some(crosswalk) = self.inputs.zone_crosswalk_file.as_mut() {
            resolve(crosswalk);
        }
        if let Some(crosswalk) = self.inputs.zone_id_crosswalk_file.as_mut() {
            resolve(crosswalk);
        }
        resolve(&mut self.inputs.households_file);
        resolve(&mut self.inputs.trips_file);
        resolve(&mut self.outputs.trips_file);
    }
}

impl Default for ZoneColumns {
    fn default() -> Self {
        ZoneColumns {
            fine_zone: default_fine_zone_column(),
            coarse_zone: default_coarse_zone_column(),
            source_zone: None,
        }
    }
}

impl Default for TripColumns {
    fn default() -> Self {
        TripColumns {
            household_id: default_household_id_column(),
            origin_zone: default_origin_zone_column(),
            destination_zone: default_destination_zone_column(),
            origin_purpose: default_origin_purpose_column(),
            destination_purpose: default_destination_purpose_column(),
        }
    }
}

impl Default for HouseholdColumns {
    fn default() -> Self {
        HouseholdColumns {
            household_id: default_household_id_column(),
            income: default_income_column(),
        }
    }
}

fn default_fine_zone_column() -> String {
    String::from("MAZ")
}

fn default_coarse_zone_column() -> String {
    String::from("TAZ1454")
}

fn default_household_id_column() -> String {
    String::from("hh_id")
}

fn default_origin_zone_column() -> String {
    String::from("orig_taz")
}

fn default_destination_zone_column() -> String {
    String::from("dest_taz")
}

fn default_origin_purpose_column() -> String {
    String::from("orig_purpose")
}

fn default_destination_purpose_column() -> String {
    String::from("dest_purpose")
}

fn default_income_column() -> String {
    String::from("income")
}
