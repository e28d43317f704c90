use super::{AppConfig, AppError};
use clap::{Parser, Subcommand};
use std::path::Path;

/// Command line tool that disaggregates coarse-zone (TAZ) trip ends into fine zones (MAZ)
/// with a size-term Monte Carlo model
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Taz2MazApp {
    #[command(subcommand)]
    pub op: Taz2MazOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Taz2MazOperation {
    /// sample fine zones for every trip and write the augmented trip list
    Run {
        /// TOML file describing inputs, outputs and model settings
        #[arg(short, long)]
        configuration_file: String,

        /// seed of the draw stream. overrides the configuration file.
        #[arg(short, long)]
        seed: Option<u64>,

        /// output trip file. overrides the configuration file.
        #[arg(short, long)]
        output_file: Option<String>,

        /// number of worker threads. defaults to one per core.
        #[arg(short, long)]
        parallelism: Option<usize>,
    },
    /// build the model and check every trip against it without sampling or writing
    Validate {
        /// TOML file describing inputs, outputs and model settings
        #[arg(short, long)]
        configuration_file: String,
    },
}

impl Taz2MazOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            Taz2MazOperation::Run {
                configuration_file,
                seed,
                output_file,
                parallelism,
            } => {
                if let Some(n) = parallelism {
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(*n)
                        .build_global()
                        .map_err(|e| {
                            AppError::InvalidUserInput(format!(
                                "failure building thread pool with {n} threads: {e}"
                            ))
                        })?;
                }
                let mut config = AppConfig::from_file(Path::new(configuration_file))?;
                if let Some(s) = seed {
                    config.disaggregation.seed = *s;
                }
                if let Some(out) = output_file {
                    config.outputs.trips_file = out.clone();
                }
                crate::app::run(&config)
            }
            Taz2MazOperation::Validate { configuration_file } => {
                let config = AppConfig::from_file(Path::new(configuration_file))?;
                crate::app::validate(&config)
            }
        }
    }
}
