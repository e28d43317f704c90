use super::{
    read_ops::{self, TripTable},
    write_ops, AppConfig, AppError,
};
use itertools::Itertools;
use std::path::Path;
use taz2maz_core::model::{
    pipeline::DisaggregationPipeline,
    probability::ProbabilityModel,
    segment::SegmentCoefficientTable,
    size_term::SizeTermModel,
    zone::ZoneAttributeTable,
    DisaggregationError,
};

/// the fully materialized inputs of a run.
pub struct LoadedInputs {
    pub zones: ZoneAttributeTable,
    pub coefficients: SegmentCoefficientTable,
    pub trips: TripTable,
}

impl LoadedInputs {
    pub fn load(config: &AppConfig) -> Result<LoadedInputs, AppError> {
        let inputs = &config.inputs;
        let records = read_ops::read_size_coefficients(Path::new(&inputs.size_coefficients_file))?;
        let coefficients = SegmentCoefficientTable::try_from(&records[..])?;

        let lookup = read_ops::read_zone_lookup(
            inputs.zone_crosswalk_file.as_deref().map(Path::new),
            inputs.zone_id_crosswalk_file.as_deref().map(Path::new),
            &config.zone_columns,
        )?;
        let zones = read_ops::read_zone_table(
            Path::new(&inputs.zone_data_file),
            &config.zone_columns,
            &config.attributes,
            &lookup,
        )?;

        let households =
            read_ops::read_households(Path::new(&inputs.households_file), &config.household_columns)?;
        let trips = read_ops::read_trips(
            Path::new(&inputs.trips_file),
            &config.trip_columns,
            &config.trip_filters,
            &households,
        )?;

        Ok(LoadedInputs {
            zones,
            coefficients,
            trips,
        })
    }

    pub fn build_model(&self, config: &AppConfig) -> Result<ProbabilityModel, AppError> {
        let size_term_model = SizeTermModel::new(config.disaggregation.zero_size_substitute)?;
        let model =
            ProbabilityModel::from_tables(&self.zones, &self.coefficients, &size_term_model)?;
        Ok(model)
    }
}

/// disaggregates the configured trip list and writes the result. nothing is written
/// unless every trip was processed.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let inputs = LoadedInputs::load(config)?;
    let model = inputs.build_model(config)?;

    // resolve the output layout before sampling so a bad layout fails fast
    let plan = config.output.plan(&inputs.trips.header, &config.remap)?;

    let pipeline = DisaggregationPipeline::new(&model, &config.disaggregation);
    let result = pipeline.run(&inputs.trips.trips)?;

    write_ops::write_trips(Path::new(&config.outputs.trips_file), &plan, &result.trips)
}

/// loads every input, builds the model and checks each trip end against it.
pub fn validate(config: &AppConfig) -> Result<(), AppError> {
    let inputs = LoadedInputs::load(config)?;
    let model = inputs.build_model(config)?;
    config.output.plan(&inputs.trips.header, &config.remap)?;

    let pipeline = DisaggregationPipeline::new(&model, &config.disaggregation);
    let unmapped = pipeline.validate(&inputs.trips.trips)?;
    log::info!(
        "{} segments, {} distributions, {} degenerate groups, {} trips",
        model.segments().len(),
        model.n_distributions(),
        model.degenerate_groups().len(),
        inputs.trips.trips.len()
    );
    match unmapped.first() {
        None => {
            log::info!("every trip end maps to a fine zone distribution");
            Ok(())
        }
        Some(first) => {
            let keys = unmapped.iter().map(|u| u.key.to_string()).unique().collect_vec();
            log::error!(
                "{} trip ends have no fine zone distribution, first {}:\n  {}",
                unmapped.len(),
                keys.len().min(10),
                keys.iter().take(10).join("\n  ")
            );
            Err(AppError::from(DisaggregationError::MappingError {
                key: first.key.clone(),
                trip_index: Some(first.trip_index),
            }))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn test_config(output_name: &str) -> AppConfig {
        fixture_config("test.toml", output_name)
    }

    fn fixture_config(file: &str, output_name: &str) -> AppConfig {
        let conf_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join(file);
        let mut config = AppConfig::from_file(&conf_path).expect("test config should load");
        config.outputs.trips_file = std::env::temp_dir()
            .join(format!("taz2maz-{}-{output_name}", std::process::id()))
            .to_string_lossy()
            .to_string();
        config
    }

    fn read_output(path: &str) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .expect("output should exist");
        reader
            .records()
            .map(|r| {
                r.expect("row should parse")
                    .iter()
                    .map(String::from)
                    .collect_vec()
            })
            .collect_vec()
    }

    #[test]
    fn test_e2e_fixture_run() {
        let config = test_config("e2e.csv");
        run(&config).expect("run should succeed");
        let rows = read_output(&config.outputs.trips_file);
        assert_eq!(
            rows[0],
            vec![
                "hh_id",
                "person_id",
                "orig_purpose",
                "dest_purpose",
                "orig_mgra",
                "dest_mgra",
                "stop_period",
                "trip_mode",
                "TRIP_TIME"
            ]
        );
        // the trip with mode 10 is filtered out
        assert_eq!(rows.len(), 6);
        let body = &rows[1..];
        assert_eq!(body[0][2], "Home");
        assert_eq!(body[0][3], "Work");
        assert_eq!(body[2][3], "Shop");
        assert!(["10001", "10002"].contains(&body[0][4].as_str()));
        assert!(["20001", "20002"].contains(&body[0][5].as_str()));
        assert_eq!(body[2][5], "30001");
        assert!(["10001", "10003"].contains(&body[3][5].as_str()));
        assert_eq!(body[4][5], "30001");
        assert!(body.iter().all(|r| r[8] == "0"));
        let _ = std::fs::remove_file(&config.outputs.trips_file);
    }

    #[test]
    fn test_e2e_same_seed_same_output() {
        let first = test_config("seed-a.csv");
        let second = test_config("seed-b.csv");
        run(&first).expect("run should succeed");
        run(&second).expect("run should succeed");
        assert_eq!(
            read_output(&first.outputs.trips_file),
            read_output(&second.outputs.trips_file)
        );
        let _ = std::fs::remove_file(&first.outputs.trips_file);
        let _ = std::fs::remove_file(&second.outputs.trips_file);
    }

    #[test]
    fn test_e2e_renumbered_zones_write_output_ids() {
        let plain = test_config("plain.csv");
        let renumbered = fixture_config("test_renumbered.toml", "renumbered.csv");
        run(&plain).expect("run should succeed");
        run(&renumbered).expect("run should succeed");
        let plain_rows = read_output(&plain.outputs.trips_file);
        let renumbered_rows = read_output(&renumbered.outputs.trips_file);
        assert_eq!(renumbered_rows[0][8], "orig_mgra");
        assert_eq!(renumbered_rows[0][9], "dest_mgra");
        assert_eq!(plain_rows.len(), renumbered_rows.len());
        // same zones under their original ids sample the same output ids
        for (p, r) in plain_rows.iter().zip(renumbered_rows.iter()).skip(1) {
            assert_eq!(p[4], r[8]);
            assert_eq!(p[5], r[9]);
            assert!(!r[8].starts_with('5'));
            assert!(!r[9].starts_with('5'));
        }
        let _ = std::fs::remove_file(&plain.outputs.trips_file);
        let _ = std::fs::remove_file(&renumbered.outputs.trips_file);
    }

    #[test]
    fn test_validate_fixture() {
        let config = test_config("validate.csv");
        validate(&config).expect("fixture should validate");
        assert!(!Path::new(&config.outputs.trips_file).exists());
    }

    #[test]
    fn test_missing_segment_writes_nothing() {
        let mut config = test_config("missing-segment.csv");
        let coefficients = std::env::temp_dir().join(format!(
            "taz2maz-{}-no-shopping.csv",
            std::process::id()
        ));
        let contents = std::fs::read_to_string(&config.inputs.size_coefficients_file)
            .expect("fixture should exist")
            .lines()
            .filter(|l| !l.starts_with("shopping"))
            .join("\n");
        std::fs::write(&coefficients, contents).expect("temp file should write");
        config.inputs.size_coefficients_file = coefficients.to_string_lossy().to_string();

        match run(&config) {
            Err(AppError::Disaggregation(DisaggregationError::ConfigurationError {
                segment,
                trip_index,
            })) => {
                assert_eq!(segment.as_str(), "shopping");
                assert_eq!(trip_index, 2);
            }
            Err(e) => panic!("expected configuration error, found {e}"),
            Ok(_) => panic!("expected configuration error"),
        }
        assert!(!Path::new(&config.outputs.trips_file).exists());
        let _ = std::fs::remove_file(&coefficients);
    }
}
