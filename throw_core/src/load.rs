//! Training load and aggregate statistics.
//!
//! All functions are pure: they take a slice of sessions and, where weeks
//! matter, the evaluation day. Nothing here reads the clock.
//!
//! Weeks run Sunday through Saturday and are anchored on the evaluation
//! day, so "this week" is always the week containing `today`.

use crate::{Event, Season, SessionFilter, ThrowSession};
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

/// Number of weeks in the default load series
pub const DEFAULT_SERIES_WEEKS: u32 = 8;

/// Longest load series accepted from config or the command line
pub const MAX_SERIES_WEEKS: u32 = 520;

/// Training load of a single session (throws × RPE)
pub fn compute_load(session: &ThrowSession) -> u64 {
    u64::from(session.throw_count) * u64::from(session.rpe)
}

/// First day (Sunday) of the week `weeks_ago` weeks before the week of `today`
///
/// Saturates at `NaiveDate::MIN` instead of panicking when the week lies
/// before the representable calendar.
pub fn week_start(today: NaiveDate, weeks_ago: u32) -> NaiveDate {
    let since_sunday = u64::from(today.weekday().num_days_from_sunday());
    let days = since_sunday + 7 * u64::from(weeks_ago);
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Sessions dated within the week `weeks_ago` weeks before the current week
pub fn sessions_in_week(
    sessions: &[ThrowSession],
    weeks_ago: u32,
    today: NaiveDate,
) -> Vec<&ThrowSession> {
    let start = week_start(today, weeks_ago);
    let end = start.checked_add_days(Days::new(7));

    sessions
        .iter()
        .filter(|s| s.date >= start && end.map_or(true, |end| s.date < end))
        .collect()
}

/// Total load over a group of sessions; 0 when empty
pub fn weekly_load<'a, I>(sessions: I) -> u64
where
    I: IntoIterator<Item = &'a ThrowSession>,
{
    sessions.into_iter().map(compute_load).sum()
}

/// Headline numbers for a group of sessions
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStats {
    pub total_sessions: usize,
    pub total_throws: u64,
    /// Mean RPE to one decimal place, 0.0 when there are no sessions
    pub avg_rpe: f64,
    pub pr_count: usize,
}

/// Count, throws, average RPE and PR days for a group of sessions
pub fn summary_stats<'a, I>(sessions: I) -> SummaryStats
where
    I: IntoIterator<Item = &'a ThrowSession>,
{
    let mut total_sessions = 0usize;
    let mut total_throws = 0u64;
    let mut rpe_sum = 0u64;
    let mut pr_count = 0usize;

    for session in sessions {
        total_sessions += 1;
        total_throws += u64::from(session.throw_count);
        rpe_sum += u64::from(session.rpe);
        if session.pr_day {
            pr_count += 1;
        }
    }

    let avg_rpe = if total_sessions == 0 {
        0.0
    } else {
        round_to_tenth(rpe_sum as f64 / total_sessions as f64)
    };

    SummaryStats {
        total_sessions,
        total_throws,
        avg_rpe,
        pr_count,
    }
}

/// `summary_stats` restricted to one season
pub fn season_stats(sessions: &[ThrowSession], season: Season) -> SummaryStats {
    summary_stats(sessions.iter().filter(|s| s.season == season))
}

/// Session count per event
///
/// Always holds all four events, iterating in display order
/// (shot put, discus, hammer, javelin).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBreakdown {
    counts: BTreeMap<Event, usize>,
}

impl EventBreakdown {
    pub fn get(&self, event: Event) -> usize {
        self.counts.get(&event).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Event, usize)> + '_ {
        self.counts.iter().map(|(e, c)| (*e, *c))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Largest single count, at least 1 (for scaling bars)
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0).max(1)
    }
}

pub fn event_breakdown(sessions: &[ThrowSession]) -> EventBreakdown {
    let mut counts: BTreeMap<Event, usize> = Event::ALL.iter().map(|e| (*e, 0)).collect();

    for session in sessions {
        *counts.entry(session.event).or_insert(0) += 1;
    }

    EventBreakdown { counts }
}

/// One point of the weekly load series
#[derive(Clone, Debug, PartialEq)]
pub struct WeeklyLoad {
    pub label: String,
    pub week_start: NaiveDate,
    pub load: u64,
}

/// Label for the week `weeks_ago` weeks back
pub fn week_label(weeks_ago: u32) -> String {
    if weeks_ago == 0 {
        "this week".to_string()
    } else {
        format!("{} weeks ago", weeks_ago)
    }
}

/// Load per week for the last `week_count` weeks, oldest first
///
/// Weeks without sessions are included with a load of 0, so the series
/// always has exactly `week_count` contiguous entries.
pub fn weekly_series(
    sessions: &[ThrowSession],
    week_count: u32,
    today: NaiveDate,
) -> Vec<WeeklyLoad> {
    (0..week_count)
        .rev()
        .map(|weeks_ago| WeeklyLoad {
            label: week_label(weeks_ago),
            week_start: week_start(today, weeks_ago),
            load: weekly_load(sessions_in_week(sessions, weeks_ago, today)),
        })
        .collect()
}

/// Sessions matching `filter`, in their original order
pub fn filter_sessions<'a>(
    sessions: &'a [ThrowSession],
    filter: &SessionFilter,
) -> Vec<&'a ThrowSession> {
    sessions.iter().filter(|s| filter.matches(s)).collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
