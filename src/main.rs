use std::process::ExitCode;

use particle_field::{FieldConfig, SimulationError};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match launch() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run with the config file named by the first argument, or the defaults.
fn launch() -> Result<(), SimulationError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            FieldConfig::load(path)?
        }
        None => FieldConfig::default(),
    };
    particle_field::run(config)
}
