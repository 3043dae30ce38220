//! CLI command implementations

use std::path::Path;

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::simulation::{DirectionBias, Simulation, SimulationConfig};

use super::args::{Cli, Command, SimulationOverrides};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.log_level);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Simulate { config, overrides } => simulate(config.as_deref(), &overrides),
        Command::Validate { config } => validate(&config),
    }
}

/// Run a simulation and print its report
pub fn simulate(config_path: Option<&Path>, overrides: &SimulationOverrides) -> CliResult<()> {
    let config = resolve_config(config_path, overrides)?;
    let report = Simulation::new(config)?.run()?;
    write_response(&report)
}

/// Validate a config file and print it with defaults filled in
pub fn validate(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    write_response(&config)
}

/// File values (or defaults) with command-line overrides applied, validated.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &SimulationOverrides,
) -> CliResult<SimulationConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> CliResult<SimulationConfig> {
    let config = SimulationConfig::load(path)?;
    let shown = path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
    Ok(config)
}

fn apply_overrides(config: &mut SimulationConfig, overrides: &SimulationOverrides) {
    if let Some(vehicles) = overrides.vehicles {
        config.vehicles = vehicles;
    }
    if let Some(iterations) = overrides.iterations {
        config.iterations = iterations;
    }
    if let Some(ms) = overrides.inter_arrival_ms {
        config.inter_arrival_ms = ms;
    }
    if let Some(ms) = overrides.service_ms {
        config.service_ms = ms;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let (Some(direction), Some(percent)) = (overrides.bias_direction, overrides.bias_percent) {
        config.bias = Some(DirectionBias { direction, percent });
    }
}
