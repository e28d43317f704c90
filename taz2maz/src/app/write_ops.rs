use super::{AppError, FieldSource, OutputPlan};
use kdam::tqdm;
use std::path::Path;
use taz2maz_core::model::trip::DisaggregatedTrip;

/// writes the disaggregated trips in trip-list order following an output plan.
pub fn write_trips(
    path: &Path,
    plan: &OutputPlan,
    trips: &[DisaggregatedTrip],
) -> Result<(), AppError> {
    let write_error = |message: String| AppError::WriteError {
        path: path.to_path_buf(),
        message,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| write_error(format!("failure creating output directory: {e}")))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| write_error(format!("failure opening output file: {e}")))?;
    writer
        .write_record(&plan.header)
        .map_err(|e| write_error(format!("failure writing header: {e}")))?;

    let write_iter = tqdm!(
        trips.iter(),
        desc = "write disaggregated trips",
        total = trips.len()
    );
    for trip in write_iter {
        let row = output_row(plan, trip);
        writer.write_record(&row).map_err(|e| {
            write_error(format!("failure writing row for trip {}: {e}", trip.trip_index))
        })?;
    }
    eprintln!();
    writer
        .flush()
        .map_err(|e| write_error(format!("failure flushing output: {e}")))?;
    log::info!("wrote {} trips to {}", trips.len(), path.display());
    Ok(())
}

/// the output values of a single trip.
pub fn output_row(plan: &OutputPlan, trip: &DisaggregatedTrip) -> Vec<String> {
    plan.fields
        .iter()
        .map(|source| match source {
            FieldSource::Input { index, remap } => {
                let value = trip
                    .trip
                    .pass_through
                    .get(*index)
                    .map(|v| v.as_str())
                    .unwrap_or_default();
                match remap {
                    Some(r) => r.apply(value).to_string(),
                    None => value.to_string(),
                }
            }
            FieldSource::OriginFineZone => trip.origin_fine_zone.to_string(),
            FieldSource::DestinationFineZone => trip.destination_fine_zone.to_string(),
            FieldSource::Constant(value) => value.clone(),
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::app::ColumnRemap;
    use std::collections::HashMap;
    use taz2maz_core::model::{
        segment::Segment,
        trip::Trip,
        zone::{CoarseZoneId, FineZoneId},
    };

    #[test]
    fn test_output_row() {
        let trip = Trip {
            household_id: String::from("7"),
            origin_zone: CoarseZoneId(1),
            destination_zone: CoarseZoneId(2),
            origin_purpose: String::from("eatout"),
            destination_purpose: String::from("Home"),
            income: 1.0,
            pass_through: vec![String::from("7"), String::from("eatout")],
        };
        let disaggregated = DisaggregatedTrip {
            trip_index: 0,
            trip: &trip,
            origin_segment: Segment::from("eatout"),
            destination_segment: Segment::from("Home"),
            origin_fine_zone: FineZoneId(101),
            destination_fine_zone: FineZoneId(202),
        };
        let plan = OutputPlan {
            header: vec![],
            fields: vec![
                FieldSource::Input {
                    index: 0,
                    remap: None,
                },
                FieldSource::Input {
                    index: 1,
                    remap: Some(ColumnRemap {
                        column: String::from("orig_purpose"),
                        values: HashMap::from([(
                            String::from("eatout"),
                            String::from("Eating Out"),
                        )]),
                    }),
                },
                FieldSource::OriginFineZone,
                FieldSource::DestinationFineZone,
                FieldSource::Constant(String::from("-1")),
            ],
        };
        assert_eq!(
            output_row(&plan, &disaggregated),
            vec!["7", "Eating Out", "101", "202", "-1"]
        );
    }
}
