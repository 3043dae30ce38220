//! Simulation configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::errors::{SimulationError, SimulationResult};
use crate::direction::Direction;

/// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Concurrent vehicle threads
    #[serde(default = "default_vehicles")]
    pub vehicles: usize,

    /// Crossings per vehicle thread
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Pause before each arrival, in milliseconds
    #[serde(default = "default_inter_arrival_ms")]
    pub inter_arrival_ms: u64,

    /// Time spent inside the intersection, in milliseconds
    #[serde(default = "default_service_ms")]
    pub service_ms: u64,

    /// Skew arrivals towards one direction
    #[serde(default)]
    pub bias: Option<DirectionBias>,

    /// Base RNG seed; vehicle `i` uses `seed + i`
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_vehicles() -> usize {
    10
}
fn default_iterations() -> usize {
    20
}
fn default_inter_arrival_ms() -> u64 {
    1
}
fn default_service_ms() -> u64 {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicles: default_vehicles(),
            iterations: default_iterations(),
            inter_arrival_ms: default_inter_arrival_ms(),
            service_ms: default_service_ms(),
            bias: None,
            seed: None,
        }
    }
}

/// Probability that an arrival comes from `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectionBias {
    pub direction: Direction,
    /// 0..=100
    pub percent: u8,
}

impl DirectionBias {
    /// Pick an origin: `direction` with `percent` probability, otherwise
    /// uniformly among all four.
    pub fn pick_origin<R: Rng>(&self, rng: &mut R) -> Direction {
        if rng.gen_ratio(u32::from(self.percent), 100) {
            self.direction
        } else {
            uniform_origin(rng)
        }
    }
}

pub(crate) fn uniform_origin<R: Rng>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

impl SimulationConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> SimulationResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| SimulationError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SimulationConfig =
            serde_json::from_str(&content).map_err(|source| SimulationError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        if self.vehicles == 0 {
            return Err(SimulationError::invalid_config("vehicles must be > 0"));
        }
        if self.iterations == 0 {
            return Err(SimulationError::invalid_config("iterations must be > 0"));
        }
        if self.vehicles.checked_mul(self.iterations).is_none() {
            return Err(SimulationError::invalid_config(format!(
                "{} vehicles x {} iterations overflows the crossing count",
                self.vehicles, self.iterations
            )));
        }
        if let Some(bias) = &self.bias {
            if bias.percent > 100 {
                return Err(SimulationError::invalid_config(format!(
                    "bias percent must be between 0 and 100, got {}",
                    bias.percent
                )));
            }
        }
        Ok(())
    }

    pub fn inter_arrival(&self) -> Duration {
        Duration::from_millis(self.inter_arrival_ms)
    }

    pub fn service_time(&self) -> Duration {
        Duration::from_millis(self.service_ms)
    }

    /// Total crossings the run will perform, saturating for unvalidated configs.
    pub fn total_crossings(&self) -> usize {
        self.vehicles.saturating_mul(self.iterations)
    }

    /// Origin for the next arrival.
    pub fn pick_origin<R: Rng>(&self, rng: &mut R) -> Direction {
        match &self.bias {
            Some(bias) => bias.pick_origin(rng),
            None => uniform_origin(rng),
        }
    }
}

/// Destination different from `origin`, uniformly among the other three.
pub fn pick_destination<R: Rng>(origin: Direction, rng: &mut R) -> Direction {
    let offset = rng.gen_range(1..Direction::ALL.len());
    Direction::ALL[(origin.index() + offset) % Direction::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.vehicles, 10);
        assert_eq!(config.iterations, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_vehicles() {
        let config = SimulationConfig {
            vehicles: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = SimulationConfig {
            iterations: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overflowing_crossing_count() {
        let config = SimulationConfig {
            vehicles: usize::MAX,
            iterations: 2,
            ..SimulationConfig::default()
        };
        assert_eq!(config.total_crossings(), usize::MAX);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_bias_over_100() {
        let config = SimulationConfig {
            bias: Some(DirectionBias {
                direction: Direction::North,
                percent: 101,
            }),
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result: Result<SimulationConfig, _> = serde_json::from_str(r#"{"cars": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"vehicles": 4, "iterations": 3, "bias": {{"direction": "east", "percent": 80}}, "seed": 7}}"#
        )
        .unwrap();

        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.vehicles, 4);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bias.unwrap().direction, Direction::East);
        assert_eq!(config.total_crossings(), 12);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SimulationConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(SimulationError::ConfigIo { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = SimulationConfig::load(file.path());
        assert!(matches!(result, Err(SimulationError::ConfigParse { .. })));
    }

    #[test]
    fn test_destination_never_equals_origin() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let origin = uniform_origin(&mut rng);
            assert_ne!(pick_destination(origin, &mut rng), origin);
        }
    }

    #[test]
    fn test_full_bias_always_picks_direction() {
        let bias = DirectionBias {
            direction: Direction::South,
            percent: 100,
        };
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(bias.pick_origin(&mut rng), Direction::South);
        }
    }
}
