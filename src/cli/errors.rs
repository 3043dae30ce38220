//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::simulation::SimulationError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, unreadable or invalid
    ConfigError,
    /// I/O error writing output
    IoError,
    /// Simulation aborted
    SimulationFailed,
    /// The controller broke an invariant during a run
    ControllerFault,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CROSSWAY_CLI_CONFIG_ERROR",
            Self::IoError => "CROSSWAY_CLI_IO_ERROR",
            Self::SimulationFailed => "CROSSWAY_CLI_SIMULATION_FAILED",
            Self::ControllerFault => "CROSSWAY_CLI_CONTROLLER_FAULT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn simulation_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SimulationFailed, msg)
    }

    pub fn controller_fault(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ControllerFault, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SimulationError> for CliError {
    fn from(e: SimulationError) -> Self {
        match e {
            SimulationError::InvalidConfig(_)
            | SimulationError::ConfigIo { .. }
            | SimulationError::ConfigParse { .. } => Self::config_error(e.to_string()),
            ref fatal if fatal.is_fatal() => Self::controller_fault(fatal.to_string()),
            other => Self::simulation_failed(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("vehicles must be > 0");
        assert_eq!(
            err.to_string(),
            "CROSSWAY_CLI_CONFIG_ERROR: vehicles must be > 0"
        );
    }

    #[test]
    fn test_simulation_error_mapping() {
        let config: CliError = SimulationError::invalid_config("bad").into();
        assert_eq!(config.code(), &CliErrorCode::ConfigError);

        let failed: CliError = SimulationError::VehiclePanicked(2).into();
        assert_eq!(failed.code(), &CliErrorCode::SimulationFailed);
        assert!(failed.message().contains("2"));

        let fault: CliError = SimulationError::ExclusionViolated {
            entering: Direction::South,
            occupant: Direction::West,
        }
        .into();
        assert_eq!(fault.code(), &CliErrorCode::ControllerFault);
        assert_eq!(fault.code_str(), "CROSSWAY_CLI_CONTROLLER_FAULT");
    }
}
