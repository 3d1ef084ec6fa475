//! Quality scaling, early-finish boost, and the sawdust flame multiplier.

/// Reward for a task completed at full (5-star) quality.
pub const BASE_TASK_REWARD: u32 = 10;

/// Sawdust reward for completing a single project milestone.
pub const MILESTONE_SAWDUST_REWARD: u32 = 60;
/// Base flame reward for completing a single project milestone.
pub const MILESTONE_FLAME_REWARD: u32 = 40;

/// Sawdust reward for finishing the last milestone of a project.
pub const PROJECT_SAWDUST_REWARD: u32 = 200;
/// Base flame reward for finishing the last milestone of a project.
pub const PROJECT_FLAME_REWARD: u32 = 100;

/// Sawdust level at which the flame multiplier starts growing; every 1000
/// sawdust above it adds +1.0 to the multiplier.
pub const SAWDUST_MULTIPLIER_BASE: u32 = 100;

/// Base reward scaled by the 1-5 quality rating, floored.
pub fn quality_reward(rating: u8) -> u32 {
    BASE_TASK_REWARD * u32::from(rating.min(5)) / 5
}

/// Boost a reward when the task finished faster than planned:
/// `reward * (1 + (1 - actual/planned))`, floored. On-time or over-time
/// completion leaves the reward unchanged — late work is never penalized
/// beyond the resource costs already paid.
pub fn early_finish_boost(reward: u32, actual_seconds: u32, planned_seconds: u32) -> u32 {
    if planned_seconds == 0 {
        return reward;
    }
    let ratio = f64::from(actual_seconds) / f64::from(planned_seconds);
    if ratio < 1.0 {
        (f64::from(reward) * (1.0 + (1.0 - ratio))).floor() as u32
    } else {
        reward
    }
}

/// Flame-reward multiplier from the sawdust stockpile:
/// `1 + max(0, (sawdust - 100) / 1000)`.
pub fn sawdust_multiplier(sawdust: u32) -> f64 {
    1.0 + f64::from(sawdust.saturating_sub(SAWDUST_MULTIPLIER_BASE)) / 1000.0
}

/// The flame input for the modifier pipeline: half the base reward, floored.
pub fn flame_base(base_reward: u32) -> u32 {
    base_reward / 2
}

/// Flame lost to halving at day end.
pub fn halved_flame(flame: u32) -> u32 {
    flame / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_reward_scale() {
        assert_eq!(quality_reward(5), 10);
        assert_eq!(quality_reward(4), 8);
        assert_eq!(quality_reward(3), 6);
        assert_eq!(quality_reward(1), 2);
        assert_eq!(quality_reward(0), 0);
        // Out-of-range ratings are clamped, not rejected
        assert_eq!(quality_reward(9), 10);
    }

    #[test]
    fn test_early_finish_boost_accelerates() {
        // Half the planned time -> 1.5x reward
        assert_eq!(early_finish_boost(10, 30, 60), 15);
        // A quarter of the planned time -> 1.75x
        assert_eq!(early_finish_boost(100, 15, 60), 175);
    }

    #[test]
    fn test_early_finish_boost_never_penalizes() {
        assert_eq!(early_finish_boost(10, 60, 60), 10);
        assert_eq!(early_finish_boost(10, 120, 60), 10);
    }

    #[test]
    fn test_early_finish_boost_zero_plan() {
        assert_eq!(early_finish_boost(10, 30, 0), 10);
    }

    #[test]
    fn test_sawdust_multiplier() {
        assert!((sawdust_multiplier(0) - 1.0).abs() < f64::EPSILON);
        assert!((sawdust_multiplier(100) - 1.0).abs() < f64::EPSILON);
        assert!((sawdust_multiplier(600) - 1.5).abs() < f64::EPSILON);
        assert!((sawdust_multiplier(1100) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flame_base_is_half_floored() {
        assert_eq!(flame_base(10), 5);
        assert_eq!(flame_base(15), 7);
        assert_eq!(halved_flame(101), 50);
        assert_eq!(halved_flame(1), 0);
    }
}
