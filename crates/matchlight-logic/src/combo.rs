//! Black-dog task qualification and combo bonus math.
//!
//! A "black-dog task" is one with high importance and low interest — the
//! kind the black dog of depression feeds on. Completing them in a row
//! builds a combo that amplifies the flame crit.

use crate::costs::Tier;

/// Bonus added per consecutive black-dog completion.
pub const COMBO_BONUS_STEP: f64 = 0.25;

/// Stacks beyond this add nothing (bonus caps at +75%).
pub const COMBO_MAX_STACKS: u32 = 3;

/// Flame multiplier for any qualifying completion, before the combo bonus.
pub const BLACK_DOG_CRIT: u32 = 2;

/// Spirit restored by a qualifying completion instead of paying the cost.
pub const BLACK_DOG_SPIRIT_RESTORE: i32 = 20;

/// Whether a task qualifies for the black-dog bonus mechanics.
pub fn is_black_dog(importance: Tier, interest: Tier) -> bool {
    importance == Tier::High && interest == Tier::Low
}

/// Combo bonus for the given stack count, capped at
/// `COMBO_MAX_STACKS * COMBO_BONUS_STEP`.
pub fn combo_bonus(stacks: u32) -> f64 {
    (f64::from(stacks) * COMBO_BONUS_STEP).min(f64::from(COMBO_MAX_STACKS) * COMBO_BONUS_STEP)
}

/// Final flame for a qualifying completion: crit doubling, then the combo
/// bonus, floored.
pub fn black_dog_flame(flame: u32, stacks: u32) -> u32 {
    (f64::from(flame * BLACK_DOG_CRIT) * (1.0 + combo_bonus(stacks))).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_dog_qualification() {
        assert!(is_black_dog(Tier::High, Tier::Low));
        assert!(!is_black_dog(Tier::High, Tier::Medium));
        assert!(!is_black_dog(Tier::Medium, Tier::Low));
        assert!(!is_black_dog(Tier::Low, Tier::High));
    }

    #[test]
    fn test_combo_bonus_steps() {
        assert!((combo_bonus(0) - 0.0).abs() < f64::EPSILON);
        assert!((combo_bonus(1) - 0.25).abs() < f64::EPSILON);
        assert!((combo_bonus(2) - 0.50).abs() < f64::EPSILON);
        assert!((combo_bonus(3) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_combo_bonus_caps_at_three_stacks() {
        assert!((combo_bonus(4) - 0.75).abs() < f64::EPSILON);
        assert!((combo_bonus(10) - 0.75).abs() < f64::EPSILON);
        assert!((combo_bonus(1000) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_black_dog_flame_crit_and_combo() {
        // No combo: plain doubling
        assert_eq!(black_dog_flame(10, 0), 20);
        // One stack: 10 * 2 * 1.25
        assert_eq!(black_dog_flame(10, 1), 25);
        // Capped: 10 * 2 * 1.75 regardless of stack count
        assert_eq!(black_dog_flame(10, 3), 35);
        assert_eq!(black_dog_flame(10, 10), 35);
    }
}
