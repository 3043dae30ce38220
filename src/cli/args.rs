//! CLI argument definitions using clap
//!
//! Commands:
//! - crossway simulate [--config <path>] [overrides...]
//! - crossway validate --config <path>

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::direction::Direction;
use crate::observability::Severity;

/// crossway - four-way intersection admission controller
#[derive(Parser, Debug)]
#[command(name = "crossway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log severity (trace, info, warn, error, fatal)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: Severity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run vehicle threads through the intersection and report wait times
    Simulate {
        /// Path to a JSON simulation config; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: SimulationOverrides,
    },

    /// Load a config file, validate it and print it with defaults filled in
    Validate {
        /// Path to a JSON simulation config
        #[arg(long)]
        config: PathBuf,
    },
}

/// Flags that replace values from the config file
#[derive(Args, Debug, Default, Clone)]
pub struct SimulationOverrides {
    /// Concurrent vehicle threads
    #[arg(long)]
    pub vehicles: Option<usize>,

    /// Crossings per vehicle
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Pause before each arrival, in milliseconds
    #[arg(long)]
    pub inter_arrival_ms: Option<u64>,

    /// Time spent inside the intersection, in milliseconds
    #[arg(long)]
    pub service_ms: Option<u64>,

    /// Base RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Direction to bias arrivals towards
    #[arg(long, requires = "bias_percent")]
    pub bias_direction: Option<Direction>,

    /// Share of arrivals from the biased direction, 0-100
    #[arg(long, requires = "bias_direction")]
    pub bias_percent: Option<u8>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate_with_overrides() {
        let cli = Cli::try_parse_from([
            "crossway",
            "simulate",
            "--vehicles",
            "4",
            "--seed",
            "9",
            "--bias-direction",
            "north",
            "--bias-percent",
            "75",
        ])
        .unwrap();

        assert_eq!(cli.log_level, Severity::Info);
        match cli.command {
            Command::Simulate { config, overrides } => {
                assert!(config.is_none());
                assert_eq!(overrides.vehicles, Some(4));
                assert_eq!(overrides.seed, Some(9));
                assert_eq!(overrides.bias_direction, Some(Direction::North));
                assert_eq!(overrides.bias_percent, Some(75));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bias_flags_go_together() {
        let result = Cli::try_parse_from(["crossway", "simulate", "--bias-direction", "east"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_validate() {
        let cli =
            Cli::try_parse_from(["crossway", "--log-level", "warn", "validate", "--config", "sim.json"])
                .unwrap();
        assert_eq!(cli.log_level, Severity::Warn);
        assert!(matches!(cli.command, Command::Validate { .. }));
    }

    #[test]
    fn test_validate_requires_config() {
        assert!(Cli::try_parse_from(["crossway", "validate"]).is_err());
    }
}
