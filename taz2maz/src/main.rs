use clap::Parser;
use taz2maz::app::{AppError, Taz2MazApp};

fn main() -> Result<(), AppError> {
    env_logger::init();

    log::debug!("cwd: {:?}", std::env::current_dir());
    log::info!("starting taz2maz at {}", chrono::Local::now().to_rfc3339());
    let args = Taz2MazApp::parse();
    let result = args.op.run();
    if let Err(e) = &result {
        log::error!("{e}");
    }
    result
}
