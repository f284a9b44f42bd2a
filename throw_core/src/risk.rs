//! Week-over-week injury risk classification.
//!
//! Risk is derived from the percentage change between this week's load and
//! last week's:
//! - Danger: more than 20% increase
//! - Warning: more than 10%, up to 20%
//! - Safe: everything else, including decreases
//!
//! A previous week with no load gives no baseline, so the change is
//! reported as 0% and the level as Safe whatever the current load is.

use crate::load::{sessions_in_week, weekly_load};
use crate::ThrowSession;
use chrono::NaiveDate;

/// Increase above which load is considered dangerous
pub const DANGER_THRESHOLD_PERCENT: i64 = 20;

/// Increase above which load is worth monitoring
pub const WARNING_THRESHOLD_PERCENT: i64 = 10;

/// Risk band for a week-over-week load change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub fn from_percentage(percentage: i64) -> Self {
        if percentage > DANGER_THRESHOLD_PERCENT {
            RiskLevel::Danger
        } else if percentage > WARNING_THRESHOLD_PERCENT {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Load is within safe range",
            RiskLevel::Warning => "Moderate load increase - Monitor closely",
            RiskLevel::Danger => "Load increased >20% - Injury risk elevated!",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "✅",
            RiskLevel::Warning => "⚡",
            RiskLevel::Danger => "⚠️",
        }
    }
}

/// Result of comparing two weekly loads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadRisk {
    /// True only for `RiskLevel::Danger`
    pub risky: bool,
    /// Rounded percentage change from the previous week
    pub percentage: i64,
    pub level: RiskLevel,
}

/// Classify the change from `previous_week_load` to `current_week_load`
pub fn check_load_risk(current_week_load: u64, previous_week_load: u64) -> LoadRisk {
    let percentage = percent_change(current_week_load, previous_week_load);
    let level = RiskLevel::from_percentage(percentage);

    LoadRisk {
        risky: level == RiskLevel::Danger,
        percentage,
        level,
    }
}

/// Rounded percentage change, 0 when there is no previous load
pub fn percent_change(current: u64, previous: u64) -> i64 {
    if previous == 0 {
        return 0;
    }

    let change = 100.0 * (current as f64 - previous as f64) / previous as f64;
    // Halves round toward positive infinity
    (change + 0.5).floor() as i64
}

/// This week's and last week's loads with their risk classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeeklyRisk {
    pub this_week_load: u64,
    pub last_week_load: u64,
    pub risk: LoadRisk,
}

/// Compare the week containing `today` with the week before it
///
/// Both loads come from the same snapshot and evaluation day, so a call
/// made across midnight on a Saturday cannot mix two different weeks.
pub fn assess_weekly_risk(sessions: &[ThrowSession], today: NaiveDate) -> WeeklyRisk {
    let this_week_load = weekly_load(sessions_in_week(sessions, 0, today));
    let last_week_load = weekly_load(sessions_in_week(sessions, 1, today));
    let risk = check_load_risk(this_week_load, last_week_load);

    tracing::debug!(
        this_week_load,
        last_week_load,
        percentage = risk.percentage,
        "Weekly load risk: {:?}",
        risk.level
    );

    WeeklyRisk {
        this_week_load,
        last_week_load,
        risk,
    }
}
