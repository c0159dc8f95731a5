//! Scoring module - points, levels and gravity speed
//!
//! - Line clears score `LINE_SCORES[n] * level`, using the level in effect
//!   before the lock.
//! - A hard drop adds a flat 2 points per cell of drop distance.
//! - The level is `lines / 10 + 1`.
//! - Gravity starts at one row per second and speeds up 100ms per level,
//!   never faster than 50ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_MS_PER_LEVEL, HARD_DROP_POINTS_PER_CELL,
    LINES_PER_LEVEL, LINE_SCORES, STARTING_LEVEL,
};

/// Score for clearing `lines` rows in one lock at `level`
pub fn clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .map_or(0, |base| base.saturating_mul(level))
}

/// Hard drop bonus for a drop of `distance` cells
pub fn hard_drop_score(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

/// Level reached after `total_lines` cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + STARTING_LEVEL
}

/// Gravity interval for a level (in milliseconds)
pub fn drop_speed_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(STARTING_LEVEL);
    BASE_DROP_MS
        .saturating_sub(steps.saturating_mul(DROP_MS_PER_LEVEL))
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_scores() {
        assert_eq!(clear_score(0, 1), 0);
        assert_eq!(clear_score(1, 1), 100);
        assert_eq!(clear_score(2, 1), 300);
        assert_eq!(clear_score(3, 1), 500);
        assert_eq!(clear_score(4, 1), 800);

        assert_eq!(clear_score(2, 3), 900);
        assert_eq!(clear_score(4, 5), 4000);
    }

    #[test]
    fn test_clear_score_out_of_table() {
        assert_eq!(clear_score(5, 3), 0);
    }

    #[test]
    fn test_hard_drop_score() {
        assert_eq!(hard_drop_score(0), 0);
        assert_eq!(hard_drop_score(5), 10);
        assert_eq!(hard_drop_score(19), 38);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_speed() {
        assert_eq!(drop_speed_ms(1), 1000);
        assert_eq!(drop_speed_ms(2), 900);
        assert_eq!(drop_speed_ms(5), 600);
        assert_eq!(drop_speed_ms(10), 100);
        assert_eq!(drop_speed_ms(11), 50);
        assert_eq!(drop_speed_ms(40), 50);
    }

    #[test]
    fn test_drop_speed_below_start_level() {
        // Level 0 never happens in play; it clamps to the level 1 interval.
        assert_eq!(drop_speed_ms(0), 1000);
    }
}
