mod app_config;
mod app_error;
mod cli;
mod column_remap;
mod output_layout;
pub mod read_ops;
mod run;
mod trip_filter;
pub mod write_ops;

pub use app_config::{AppConfig, HouseholdColumns, InputFiles, OutputFiles, TripColumns, ZoneColumns};
pub use app_error::AppError;
pub use cli::{Taz2MazApp, Taz2MazOperation};
pub use column_remap::ColumnRemap;
pub use output_layout::{FieldSource, OutputColumn, OutputLayout, OutputPlan};
pub use run::{run, validate, LoadedInputs};
pub use trip_filter::TripFilter;
