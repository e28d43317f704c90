use std::path::PathBuf;
use taz2maz_core::model::DisaggregationError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("trip {trip_index} references household '{household_id}' which is not in the household file")]
    MissingHousehold {
        household_id: String,
        trip_index: usize,
    },
    #[error(transparent)]
    Disaggregation(#[from] DisaggregationError),
}
