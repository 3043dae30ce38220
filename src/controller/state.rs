//! Shared counters guarded by the intersection lock

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::{Direction, DIRECTION_COUNT};

/// Counters protected by the controller's mutex.
///
/// Invariant: at most one entry of `inside` is nonzero.
#[derive(Debug, Default)]
pub(crate) struct IntersectionState {
    /// Vehicles currently occupying the intersection, per origin.
    pub(crate) inside: [usize; DIRECTION_COUNT],
    /// Vehicles blocked in `before_entry`, per origin.
    pub(crate) waiting: [usize; DIRECTION_COUNT],
}

impl IntersectionState {
    /// True when a direction other than `origin` holds the intersection.
    pub(crate) fn occupied_by_other(&self, origin: Direction) -> bool {
        Direction::ALL
            .iter()
            .any(|d| *d != origin && self.inside[d.index()] != 0)
    }

    pub(crate) fn snapshot(&self) -> IntersectionSnapshot {
        IntersectionSnapshot {
            inside: self.inside,
            waiting: self.waiting,
        }
    }
}

/// Point-in-time copy of the controller's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionSnapshot {
    pub inside: [usize; DIRECTION_COUNT],
    pub waiting: [usize; DIRECTION_COUNT],
}

impl IntersectionSnapshot {
    pub fn inside(&self, direction: Direction) -> usize {
        self.inside[direction.index()]
    }

    pub fn waiting(&self, direction: Direction) -> usize {
        self.waiting[direction.index()]
    }

    /// The direction currently holding the intersection, if any.
    pub fn occupant(&self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.inside[d.index()] != 0)
    }

    /// No vehicle inside and none waiting.
    pub fn is_idle(&self) -> bool {
        self.inside.iter().all(|n| *n == 0) && self.waiting.iter().all(|n| *n == 0)
    }

    /// Number of directions with a vehicle inside. Never more than one.
    pub fn occupied_directions(&self) -> usize {
        self.inside.iter().filter(|n| **n != 0).count()
    }
}

impl fmt::Display for IntersectionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inside={:?} waiting={:?}", self.inside, self.waiting)
    }
}
