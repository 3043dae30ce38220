//! Arrival directions
//!
//! The four directions are fixed. Each one is a class for mutual exclusion:
//! vehicles of one direction may share the intersection, vehicles of
//! different directions may not.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of arrival directions.
pub const DIRECTION_COUNT: usize = 4;

/// Direction a vehicle arrives from (or leaves towards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    /// All directions in index order. This is also the scan order used when
    /// picking a favored direction.
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Index into per-direction arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string names no direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown direction: '{0}' (expected north, south, east or west)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_fixed() {
        assert_eq!(Direction::North.index(), 0);
        assert_eq!(Direction::South.index(), 1);
        assert_eq!(Direction::East.index(), 2);
        assert_eq!(Direction::West.index(), 3);
    }

    #[test]
    fn test_from_index() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_index(d.index()), Some(d));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("S".parse::<Direction>(), Ok(Direction::South));
        assert_eq!(" East ".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("w".parse::<Direction>(), Ok(Direction::West));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::West).unwrap();
        assert_eq!(json, "\"west\"");

        let parsed: Direction = serde_json::from_str("\"south\"").unwrap();
        assert_eq!(parsed, Direction::South);
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::North.to_string(), "north");
    }
}
