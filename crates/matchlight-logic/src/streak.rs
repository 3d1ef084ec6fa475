//! Daily-task streak rule over calendar dates.

use chrono::NaiveDate;

/// Next streak value when a daily task is completed on `today`.
///
/// Completed yesterday -> streak grows; already completed today -> streak
/// is unchanged (the completion was already counted); anything else,
/// including a first-ever completion, starts a fresh streak of 1.
pub fn next_streak(last_completed: Option<NaiveDate>, today: NaiveDate, current: u32) -> u32 {
    match last_completed {
        Some(last) if last == today => current,
        Some(last) if today.pred_opt() == Some(last) => current + 1,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_completion_starts_streak() {
        assert_eq!(next_streak(None, d("2024-03-10"), 0), 1);
    }

    #[test]
    fn test_consecutive_day_increments() {
        assert_eq!(next_streak(Some(d("2024-03-09")), d("2024-03-10"), 4), 5);
    }

    #[test]
    fn test_same_day_is_noop() {
        assert_eq!(next_streak(Some(d("2024-03-10")), d("2024-03-10"), 4), 4);
    }

    #[test]
    fn test_gap_resets() {
        assert_eq!(next_streak(Some(d("2024-03-07")), d("2024-03-10"), 9), 1);
    }

    #[test]
    fn test_month_boundary() {
        assert_eq!(next_streak(Some(d("2024-02-29")), d("2024-03-01"), 2), 3);
    }
}
