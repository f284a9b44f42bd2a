//! Consecutive-day logging streaks.

use crate::ThrowSession;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Number of consecutive days with at least one session, ending today or
/// yesterday
///
/// Rules:
/// 1. No sessions → 0
/// 2. Most recent session older than yesterday → 0 (streak broken)
/// 3. Otherwise count backward from today (if logged) or yesterday until
///    the first day without a session
///
/// Days are counted once no matter how many sessions share them, and the
/// input may be in any order. Sessions dated after `today` never anchor
/// a streak.
pub fn calculate_streak(sessions: &[ThrowSession], today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = sessions.iter().map(|s| s.date).collect();
    let yesterday = today - Duration::days(1);

    let anchor = if dates.contains(&today) {
        today
    } else if dates.contains(&yesterday) {
        yesterday
    } else {
        tracing::debug!("No session today or yesterday, streak is 0");
        return 0;
    };

    let mut streak = 0;
    let mut day = anchor;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }

    tracing::debug!("Streak of {} days ending {}", streak, anchor);
    streak
}

/// Date of the most recent session, if any
pub fn last_log_date(sessions: &[ThrowSession]) -> Option<NaiveDate> {
    sessions.iter().map(|s| s.date).max()
}
