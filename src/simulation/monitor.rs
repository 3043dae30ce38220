//! Independent occupancy monitor
//!
//! Tracks who is inside the intersection from the vehicles' side, with its
//! own lock, so a broken controller shows up as an `ExclusionViolated` error
//! instead of passing silently. Also collects per-direction wait statistics.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

use super::errors::{SimulationError, SimulationResult};
use crate::direction::{Direction, DIRECTION_COUNT};

#[derive(Debug, Default, Clone, Copy)]
struct DirectionTally {
    inside: usize,
    peak_inside: usize,
    admitted: u64,
    total_wait: Duration,
    max_wait: Duration,
}

/// Vehicle-side view of the intersection
#[derive(Debug, Default)]
pub struct OccupancyMonitor {
    tallies: Mutex<[DirectionTally; DIRECTION_COUNT]>,
}

impl OccupancyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a vehicle from `origin` entered after waiting `wait`.
    ///
    /// Fails if any other direction is recorded as inside.
    pub fn enter(&self, origin: Direction, wait: Duration) -> SimulationResult<()> {
        let mut tallies = self.tallies.lock().expect("monitor lock poisoned");

        if let Some(occupant) = Direction::ALL
            .into_iter()
            .find(|d| *d != origin && tallies[d.index()].inside != 0)
        {
            return Err(SimulationError::ExclusionViolated {
                entering: origin,
                occupant,
            });
        }

        let tally = &mut tallies[origin.index()];
        tally.inside += 1;
        tally.peak_inside = tally.peak_inside.max(tally.inside);
        tally.admitted += 1;
        tally.total_wait += wait;
        tally.max_wait = tally.max_wait.max(wait);
        Ok(())
    }

    /// Record that a vehicle from `origin` left.
    pub fn exit(&self, origin: Direction) {
        let mut tallies = self.tallies.lock().expect("monitor lock poisoned");
        let tally = &mut tallies[origin.index()];
        tally.inside = tally.inside.saturating_sub(1);
    }

    /// Vehicles currently recorded inside, per direction.
    pub fn inside(&self) -> [usize; DIRECTION_COUNT] {
        let tallies = self.tallies.lock().expect("monitor lock poisoned");
        let mut inside = [0; DIRECTION_COUNT];
        for d in Direction::ALL {
            inside[d.index()] = tallies[d.index()].inside;
        }
        inside
    }

    /// Per-direction statistics in index order.
    pub fn stats(&self) -> Vec<DirectionStats> {
        let tallies = self.tallies.lock().expect("monitor lock poisoned");
        Direction::ALL
            .into_iter()
            .map(|d| DirectionStats::from_tally(d, &tallies[d.index()]))
            .collect()
    }
}

/// Wait statistics for one origin direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionStats {
    pub direction: Direction,
    pub admitted: u64,
    pub total_wait_us: u64,
    pub max_wait_us: u64,
    pub mean_wait_us: u64,
    /// Most vehicles from this direction inside at the same time
    pub peak_inside: usize,
}

impl DirectionStats {
    fn from_tally(direction: Direction, tally: &DirectionTally) -> Self {
        let total_wait_us = micros(tally.total_wait);
        let mean_wait_us = if tally.admitted == 0 {
            0
        } else {
            total_wait_us / tally.admitted
        };
        Self {
            direction,
            admitted: tally.admitted,
            total_wait_us,
            max_wait_us: micros(tally.max_wait),
            mean_wait_us,
            peak_inside: tally.peak_inside,
        }
    }
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
