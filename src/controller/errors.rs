//! Controller errors
//!
//! Both variants describe a caller-side protocol violation (an exit with no
//! matching admission, or a shutdown with vehicles still in flight). The
//! controller cannot recover from either; they are fatal.

use thiserror::Error;

use super::IntersectionSnapshot;
use crate::direction::Direction;

/// Result type for checked controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Controller consistency failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Vehicle from {direction} exited but no {direction} vehicle is inside the intersection")]
    NotInside { direction: Direction },

    #[error("Shutdown with vehicles in flight: {snapshot}")]
    VehiclesInFlight { snapshot: IntersectionSnapshot },
}

impl ControllerError {
    /// Stable code for log output
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotInside { .. } => "CROSSWAY_EXIT_WITHOUT_ENTRY",
            Self::VehiclesInFlight { .. } => "CROSSWAY_SHUTDOWN_NOT_DRAINED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_inside_display() {
        let err = ControllerError::NotInside {
            direction: Direction::East,
        };
        let msg = err.to_string();
        assert!(msg.contains("east"));
        assert_eq!(err.code(), "CROSSWAY_EXIT_WITHOUT_ENTRY");
    }

    #[test]
    fn test_in_flight_display() {
        let err = ControllerError::VehiclesInFlight {
            snapshot: IntersectionSnapshot {
                inside: [0, 2, 0, 0],
                waiting: [1, 0, 0, 0],
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("inside=[0, 2, 0, 0]"));
        assert!(msg.contains("waiting=[1, 0, 0, 0]"));
    }
}
