//! Consecutive-day activity streaks.
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// Length of the activity streak ending today.
///
/// A streak with no activity yet today is still alive if yesterday was
/// active. Dates after `today` are ignored and duplicates count once.
#[must_use]
pub fn calculate_streak(activity_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = activity_dates
        .iter()
        .copied()
        .filter(|date| *date <= today)
        .collect();

    let Some(mut cursor) = [Some(today), today.checked_sub_days(Days::new(1))]
        .into_iter()
        .flatten()
        .find(|day| days.contains(day))
    else {
        return 0;
    };

    let mut streak = 0_u32;
    while days.contains(&cursor) {
        streak = streak.saturating_add(1);
        match cursor.checked_sub_days(Days::new(1)) {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}
