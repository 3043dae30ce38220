//! Observability for the intersection controller and its simulation driver
//!
//! - Structured logging (JSON lines)
//! - Passive controller counters
//! - Lifecycle events and begin/complete scopes
//!
//! Observability is read-only: nothing here feeds back into admission.
//!
//! ```ignore
//! use crossway::observability::{Logger, Event, log_event};
//!
//! log_event(Event::ConfigLoaded);
//! Logger::info("VEHICLE_ADMITTED", &[("origin", "north")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{ControllerMetrics, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
