use crate::errors::ReflectionError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const WEEKLY_WINDOW_DAYS: u32 = 7;
pub const MONTHLY_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub weekly_rate: u8,
    pub monthly_rate: u8,
}

/// Consecutive completed days ending at `today`. Zero when `today` itself is
/// not completed.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days = unique(dates);
    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let days = unique(dates);
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}

/// Share of the `window_days` ending at `today` (inclusive) that are
/// completed, as a rounded percentage.
pub fn completion_rate(
    dates: &[NaiveDate],
    window_days: u32,
    today: NaiveDate,
) -> Result<u8, ReflectionError> {
    if window_days == 0 {
        return Err(ReflectionError::InvalidWindow);
    }

    // Windows reaching past the earliest representable date start there.
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .unwrap_or(NaiveDate::MIN);
    let hits = unique(dates).range(start..=today).count();
    let rate = (hits as f64 / f64::from(window_days) * 100.0).round();
    Ok(rate.clamp(0.0, 100.0) as u8)
}

pub fn summarize(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    StreakSummary {
        current_streak: current_streak(dates, today),
        longest_streak: longest_streak(dates),
        weekly_rate: window_rate(dates, WEEKLY_WINDOW_DAYS, today),
        monthly_rate: window_rate(dates, MONTHLY_WINDOW_DAYS, today),
    }
}

fn window_rate(dates: &[NaiveDate], window_days: u32, today: NaiveDate) -> u8 {
    // Both summary windows are non-zero constants.
    completion_rate(dates, window_days, today).unwrap_or_default()
}

fn unique(dates: &[NaiveDate]) -> BTreeSet<NaiveDate> {
    dates.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(current_streak(&[], day(10)), 0);
        assert_eq!(longest_streak(&[]), 0);
        assert_eq!(completion_rate(&[], 7, day(10)).unwrap(), 0);
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        // Mon 2026-03-02 .. Wed 2026-03-04
        let dates = [day(2), day(3), day(4)];
        assert_eq!(current_streak(&dates, day(4)), 3);
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn gap_breaks_the_run() {
        let dates = [day(2), day(4)];
        assert_eq!(current_streak(&dates, day(4)), 1);
        assert_eq!(longest_streak(&dates), 1);
    }

    #[test]
    fn missing_today_means_no_current_streak() {
        let dates = [day(1), day(2), day(3)];
        assert_eq!(current_streak(&dates, day(4)), 0);
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn longest_ignores_order_and_duplicates() {
        let sorted = [day(1), day(2), day(3), day(7), day(8)];
        let shuffled = [day(8), day(2), day(2), day(7), day(1), day(3), day(3)];
        assert_eq!(longest_streak(&sorted), 3);
        assert_eq!(longest_streak(&shuffled), 3);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let feb_end = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        let dates = [feb_end, day(1), day(2)];
        assert_eq!(current_streak(&dates, day(2)), 3);
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn weekly_rate_is_full_only_when_every_day_present() {
        let week: Vec<NaiveDate> = (4..=10).map(day).collect();
        assert_eq!(completion_rate(&week, 7, day(10)).unwrap(), 100);
        assert_eq!(completion_rate(&week[1..], 7, day(10)).unwrap(), 86);
    }

    #[test]
    fn rate_ignores_dates_outside_window() {
        let dates = [day(1), day(9), day(10), day(11), day(11)];
        // window 2026-03-04..=2026-03-10 holds the 9th and 10th
        assert_eq!(completion_rate(&dates, 7, day(10)).unwrap(), 29);
    }

    #[test]
    fn huge_window_is_clamped_to_earliest_date() {
        assert_eq!(completion_rate(&[day(10)], u32::MAX, day(10)).unwrap(), 0);
    }

    #[test]
    fn dates_near_the_calendar_minimum_do_not_overflow() {
        let earliest = NaiveDate::MIN;
        let today = earliest.checked_add_days(Days::new(2)).unwrap();
        let dates = [earliest, earliest.succ_opt().unwrap(), today];

        assert_eq!(current_streak(&[earliest], earliest), 1);
        assert_eq!(current_streak(&dates, today), 3);
        let summary = summarize(&[today], today);
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.weekly_rate, 14);
        assert_eq!(summary.monthly_rate, 3);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            completion_rate(&[day(1)], 0, day(1)),
            Err(ReflectionError::InvalidWindow)
        ));
    }

    #[test]
    fn summary_combines_all_figures() {
        let dates: Vec<NaiveDate> = (1..=15).map(day).collect();
        let summary = summarize(&dates, day(15));
        assert_eq!(summary.current_streak, 15);
        assert_eq!(summary.longest_streak, 15);
        assert_eq!(summary.weekly_rate, 100);
        assert_eq!(summary.monthly_rate, 50);
    }
}
