//! crossway - admission control for a four-way intersection
//!
//! Vehicle threads from four directions share one intersection. Vehicles
//! from the same origin may be inside together; different origins never
//! overlap. Built on one mutex and one condition variable per direction.
//!
//! ```no_run
//! use std::sync::Arc;
//! use crossway::{Direction, IntersectionController};
//!
//! let controller = Arc::new(IntersectionController::init());
//! controller.before_entry(Direction::North, Direction::South);
//! // ... cross ...
//! controller.after_exit(Direction::North, Direction::South);
//! Arc::try_unwrap(controller).unwrap().shutdown();
//! ```

pub mod cli;
pub mod controller;
pub mod direction;
pub mod observability;
pub mod simulation;

pub use controller::{favored_direction, ControllerError, IntersectionController, IntersectionSnapshot};
pub use direction::Direction;
