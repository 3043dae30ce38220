//! Result of one simulation run

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::config::SimulationConfig;
use super::monitor::DirectionStats;
use crate::controller::IntersectionSnapshot;
use crate::observability::MetricsSnapshot;

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    /// Seed actually used, including when the config left it unset
    pub seed: u64,
    pub config: SimulationConfig,
    pub directions: Vec<DirectionStats>,
    pub total_admitted: u64,
    /// Controller counters after every vehicle finished
    pub final_state: IntersectionSnapshot,
    pub metrics: MetricsSnapshot,
}

impl SimulationReport {
    /// Direction with the largest single wait, first in index order on ties.
    pub fn slowest_direction(&self) -> Option<&DirectionStats> {
        self.directions
            .iter()
            .filter(|s| s.admitted > 0)
            .fold(None, |best: Option<&DirectionStats>, s| match best {
                Some(b) if b.max_wait_us >= s.max_wait_us => Some(b),
                _ => Some(s),
            })
    }
}
