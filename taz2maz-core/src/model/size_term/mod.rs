mod size_table;
mod size_term_model;

pub use size_table::{SizeTable, ZoneSize};
pub use size_term_model::{SizeTermModel, DEFAULT_ZERO_SIZE_SUBSTITUTE};
