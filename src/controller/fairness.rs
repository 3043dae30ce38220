//! Exit-time fairness heuristic
//!
//! When the intersection goes idle, the direction with the most blocked
//! vehicles is woken. This is only a hint for which condition variable to
//! broadcast; admission safety rests on the re-check loop in `before_entry`.

use crate::direction::{Direction, DIRECTION_COUNT};

/// Direction with the strictly largest wait count.
///
/// Scans North, South, East, West and keeps the first strict maximum, so ties
/// go to the lower index. Returns `None` when nobody is waiting.
pub fn favored_direction(waiting: &[usize; DIRECTION_COUNT]) -> Option<Direction> {
    let mut max = 0;
    let mut favored = None;
    for direction in Direction::ALL {
        let count = waiting[direction.index()];
        if count > max {
            max = count;
            favored = Some(direction);
        }
    }
    favored
}
