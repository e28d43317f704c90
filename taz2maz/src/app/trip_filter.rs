use super::AppError;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// a row predicate applied to the trip list before disaggregation. rows that fail a
/// filter are removed and consume no draws.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TripFilter {
    /// keep rows whose numeric value in `column` is strictly below `value`
    LessThan { column: String, value: f64 },
    /// drop rows whose value in `column` is one of `values`
    Exclude { column: String, values: Vec<String> },
}

impl TripFilter {
    pub fn column(&self) -> &str {
        match self {
            TripFilter::LessThan { column, .. } => column,
            TripFilter::Exclude { column, .. } => column,
        }
    }

    /// confirms the filter column exists, returning its position.
    pub fn column_index(&self, header: &HashMap<String, usize>) -> Result<usize, AppError> {
        header.get(self.column()).copied().ok_or_else(|| {
            AppError::InvalidUserInput(format!(
                "trip filter column '{}' is not in the trip file",
                self.column()
            ))
        })
    }

    /// true if the record passes this filter.
    pub fn keep(&self, column_index: usize, record: &StringRecord) -> Result<bool, AppError> {
        let field = record.get(column_index).unwrap_or_default().trim();
        match self {
            TripFilter::LessThan { column, value } => {
                let parsed = field.parse::<f64>().map_err(|e| {
                    AppError::InvalidUserInput(format!(
                        "trip filter on '{column}' could not read '{field}' as a number: {e}"
                    ))
                })?;
                Ok(parsed < *value)
            }
            TripFilter::Exclude { values, .. } => Ok(!values.iter().any(|v| v == field)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn header() -> HashMap<String, usize> {
        HashMap::from([(String::from("hh_id"), 0), (String::from("trip_mode"), 1)])
    }

    #[test]
    fn test_less_than() {
        let filter: TripFilter =
            toml::from_str("type = \"less_than\"\ncolumn = \"trip_mode\"\nvalue = 9")
                .expect("filter should parse");
        let idx = filter.column_index(&header()).expect("column exists");
        assert!(filter
            .keep(idx, &StringRecord::from(vec!["1", "8"]))
            .expect("numeric"));
        assert!(!filter
            .keep(idx, &StringRecord::from(vec!["1", "9"]))
            .expect("numeric"));
        assert!(filter.keep(idx, &StringRecord::from(vec!["1", "walk"])).is_err());
    }

    #[test]
    fn test_exclude() {
        let filter = TripFilter::Exclude {
            column: String::from("trip_mode"),
            values: vec![String::from("11"), String::from("12")],
        };
        let idx = filter.column_index(&header()).expect("column exists");
        assert!(!filter
            .keep(idx, &StringRecord::from(vec!["1", "12"]))
            .expect("infallible"));
        assert!(filter
            .keep(idx, &StringRecord::from(vec!["1", "1"]))
            .expect("infallible"));
    }

    #[test]
    fn test_missing_column() {
        let filter = TripFilter::LessThan {
            column: String::from("tour_mode"),
            value: 9.0,
        };
        assert!(filter.column_index(&header()).is_err());
    }
}
