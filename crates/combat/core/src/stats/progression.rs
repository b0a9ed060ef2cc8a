//! Experience thresholds.
//!
//! Combat only records how many level-ups were earned; applying them
//! (new HP, new techniques) happens outside combat.

pub const MAX_LEVEL: i32 = 20;

/// Total experience required to reach each level (index 0 = level 1).
const THRESHOLDS: [u32; MAX_LEVEL as usize] = [
    0, 300, 900, 2_700, 6_500, 14_000, 23_000, 34_000, 48_000, 64_000, 85_000, 100_000, 120_000,
    140_000, 165_000, 195_000, 225_000, 265_000, 305_000, 355_000,
];

/// Experience needed to reach `level`, or `None` past the cap.
pub fn experience_for_level(level: i32) -> Option<u32> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return None;
    }
    Some(THRESHOLDS[(level - 1) as usize])
}

/// Highest level reachable with `experience`.
pub fn level_for_experience(experience: u32) -> i32 {
    THRESHOLDS
        .iter()
        .rposition(|&needed| experience >= needed)
        .map_or(1, |index| index as i32 + 1)
}

/// Level-ups a character at `level` with `already_pending` unapplied
/// level-ups gains from reaching `experience`.
pub fn level_ups_earned(level: i32, already_pending: u32, experience: u32) -> u32 {
    let effective = level + already_pending as i32;
    (level_for_experience(experience) - effective).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_both_ways() {
        assert_eq!(experience_for_level(1), Some(0));
        assert_eq!(experience_for_level(5), Some(6_500));
        assert_eq!(experience_for_level(21), None);
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(299), 1);
        assert_eq!(level_for_experience(300), 2);
        assert_eq!(level_for_experience(1_000_000), MAX_LEVEL);
    }

    #[test]
    fn pending_level_ups_are_not_double_counted() {
        assert_eq!(level_ups_earned(1, 0, 950), 2);
        assert_eq!(level_ups_earned(1, 2, 950), 0);
        assert_eq!(level_ups_earned(3, 0, 950), 0);
    }
}
