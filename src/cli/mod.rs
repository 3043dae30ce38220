//! Command-line interface
//!
//! - simulate: run vehicle threads through a fresh controller
//! - validate: check a simulation config file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, SimulationOverrides};
pub use commands::{resolve_config, run, run_command, simulate, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
