#![forbid(unsafe_code)]

//! Core domain model and analytics for the Throwlog session tracker.
//!
//! This crate provides:
//! - Domain types (events, session types, seasons, session records)
//! - Training load and aggregate statistics
//! - Week-over-week injury risk classification
//! - Consecutive-day streaks
//! - Persistence (JSONL session log, streak cache) and export (CSV, JSON)
//!
//! The analytics modules (`load`, `risk`, `streak`) are pure: they never
//! touch the filesystem or read the clock, and take the evaluation day as
//! an argument.

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod load;
pub mod risk;
pub mod streak;
pub mod store;
pub mod state;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{rpe_descriptor, weight_presets, RpeBand, WeightPreset};
pub use config::Config;
pub use load::{
    compute_load, event_breakdown, filter_sessions, season_stats, sessions_in_week, summary_stats,
    weekly_load, weekly_series, EventBreakdown, SummaryStats, WeeklyLoad, DEFAULT_SERIES_WEEKS,
    MAX_SERIES_WEEKS,
};
pub use risk::{assess_weekly_risk, check_load_risk, LoadRisk, RiskLevel, WeeklyRisk};
pub use streak::calculate_streak;
pub use store::{JsonlSink, SessionSink};
pub use state::StreakRecord;
pub use export::Backup;
