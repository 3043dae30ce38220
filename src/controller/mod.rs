//! Intersection admission controller
//!
//! Vehicles arriving from four directions share one intersection:
//! - Vehicles from the same origin may be inside together, in any number
//! - Vehicles from different origins never overlap
//! - When the intersection empties, the direction with the most waiters is woken
//!
//! All state sits behind one mutex. Each direction parks on its own condition
//! variable. Wakeups are broadcasts and every waiter re-checks its predicate,
//! so waking more vehicles than can enter is harmless.
//!
//! # Starvation
//!
//! A new vehicle from the active direction is admitted regardless of how many
//! vehicles wait elsewhere. A steady stream from one origin can therefore hold
//! the intersection indefinitely. The exit-time heuristic only applies once
//! the intersection actually empties.

mod errors;
mod fairness;
mod state;

pub use errors::{ControllerError, ControllerResult};
pub use fairness::favored_direction;
pub use state::IntersectionSnapshot;

use std::sync::{Condvar, Mutex, MutexGuard};

use crate::direction::{Direction, DIRECTION_COUNT};
use crate::observability::{log_event, log_event_with_fields, ControllerMetrics, Event};
use state::IntersectionState;

/// Admission controller for a four-way intersection.
///
/// Created once with [`IntersectionController::init`], shared by reference
/// (typically `Arc`) with every vehicle thread, and consumed by
/// [`IntersectionController::shutdown`] after all vehicles are done.
#[derive(Debug)]
pub struct IntersectionController {
    /// Counters, guarded by the intersection lock.
    state: Mutex<IntersectionState>,
    /// One condition variable per origin direction, indexed by `Direction::index`.
    lanes: [Condvar; DIRECTION_COUNT],
    /// Passive counters.
    metrics: ControllerMetrics,
}

impl IntersectionController {
    /// Create the lock, the four condition variables and zeroed counters.
    pub fn init() -> Self {
        let controller = Self {
            state: Mutex::new(IntersectionState::default()),
            lanes: [Condvar::new(), Condvar::new(), Condvar::new(), Condvar::new()],
            metrics: ControllerMetrics::new(),
        };
        log_event(Event::IntersectionInit);
        controller
    }

    /// Block until a vehicle from `origin` may enter.
    ///
    /// Returns once no other direction occupies the intersection. Vehicles
    /// from `origin` already inside never delay the caller. `destination`
    /// does not affect admission.
    pub fn before_entry(&self, origin: Direction, _destination: Direction) {
        let i = origin.index();
        let mut state = self.lock();
        state.waiting[i] += 1;

        let mut blocked = false;
        while state.occupied_by_other(origin) {
            blocked = true;
            state = self.lanes[i]
                .wait(state)
                .expect("intersection lock poisoned");
            self.metrics.increment_wakeups();
            if state.occupied_by_other(origin) {
                self.metrics.increment_redundant_wakeups();
            }
        }

        state.waiting[i] -= 1;
        state.inside[i] += 1;

        self.metrics.increment_admissions();
        if blocked {
            self.metrics.increment_blocked_entries();
        }
    }

    /// Release the intersection for a vehicle from `origin`.
    ///
    /// Never blocks. Panics if no vehicle from `origin` is inside; that is a
    /// mismatched entry/exit pair in the caller and is not recoverable.
    pub fn after_exit(&self, origin: Direction, destination: Direction) {
        if let Err(err) = self.try_after_exit(origin, destination) {
            fatal(&err);
        }
    }

    /// Checked form of [`after_exit`](Self::after_exit).
    ///
    /// On error the counters are left untouched.
    pub fn try_after_exit(&self, origin: Direction, _destination: Direction) -> ControllerResult<()> {
        let i = origin.index();
        let mut state = self.lock();

        let favored = favored_direction(&state.waiting);

        if state.inside[i] == 0 {
            return Err(ControllerError::NotInside { direction: origin });
        }
        state.inside[i] -= 1;
        self.metrics.increment_exits();

        // Same-origin vehicles still inside keep everyone else excluded.
        if state.inside[i] != 0 {
            return Ok(());
        }

        if let Some(next) = favored {
            self.lanes[next.index()].notify_all();
            self.metrics.increment_broadcasts();
        }
        Ok(())
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> IntersectionSnapshot {
        self.lock().snapshot()
    }

    pub fn metrics(&self) -> &ControllerMetrics {
        &self.metrics
    }

    /// Tear down the controller. Panics if any vehicle is inside or waiting.
    pub fn shutdown(self) {
        if let Err(err) = self.try_shutdown() {
            fatal(&err);
        }
    }

    /// Checked form of [`shutdown`](Self::shutdown).
    pub fn try_shutdown(self) -> ControllerResult<()> {
        let snapshot = self.snapshot();
        if !snapshot.is_idle() {
            return Err(ControllerError::VehiclesInFlight { snapshot });
        }

        let admissions = self.metrics.snapshot().admissions.to_string();
        log_event_with_fields(Event::IntersectionShutdown, &[("admissions", admissions.as_str())]);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, IntersectionState> {
        self.state.lock().expect("intersection lock poisoned")
    }
}

/// Log a consistency failure and abort the calling thread.
fn fatal(err: &ControllerError) -> ! {
    let reason = err.to_string();
    log_event_with_fields(
        Event::InvariantViolation,
        &[("code", err.code()), ("reason", reason.as_str())],
    );
    panic!("{}", reason);
}
