//! Observable lifecycle events
//!
//! Events are explicit and typed; each maps to one stable log name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Controller lifecycle
    /// Lock and condition variables created
    IntersectionInit,
    /// Controller torn down with no vehicles in flight
    IntersectionShutdown,
    /// Entry/exit protocol broken by a caller (FATAL)
    InvariantViolation,

    // Configuration
    /// Simulation configuration loaded and validated
    ConfigLoaded,

    // Simulation
    /// Occupancy monitor saw two directions inside at once (FATAL)
    ExclusionViolation,
    /// A vehicle thread panicked
    VehiclePanicked,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IntersectionInit => "INTERSECTION_INIT",
            Event::IntersectionShutdown => "INTERSECTION_SHUTDOWN",
            Event::InvariantViolation => "INTERSECTION_INVARIANT_VIOLATION",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ExclusionViolation => "EXCLUSION_VIOLATION",
            Event::VehiclePanicked => "VEHICLE_PANICKED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::InvariantViolation | Event::ExclusionViolation)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_unique() {
        let events = [
            Event::IntersectionInit,
            Event::IntersectionShutdown,
            Event::InvariantViolation,
            Event::ConfigLoaded,
            Event::ExclusionViolation,
            Event::VehiclePanicked,
        ];

        let mut names: Vec<_> = events.iter().map(|e| e.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), events.len());
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::InvariantViolation.is_fatal());
        assert!(Event::ExclusionViolation.is_fatal());
        assert!(!Event::VehiclePanicked.is_fatal());
        assert!(!Event::IntersectionInit.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::IntersectionShutdown), "INTERSECTION_SHUTDOWN");
    }
}
