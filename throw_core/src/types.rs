//! Core domain types for the throwing session tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Throwing events, session types and seasons
//! - Implement weight and distance units
//! - Session records and the input used to create them
//! - Session filters

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lowest valid Rate of Perceived Exertion
pub const RPE_MIN: u8 = 1;

/// Highest valid Rate of Perceived Exertion
pub const RPE_MAX: u8 = 10;

// ============================================================================
// Enumerations
// ============================================================================

/// Throwing event
///
/// Variant order is the fixed display order used by breakdowns.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Event {
    ShotPut,
    Discus,
    Hammer,
    Javelin,
}

impl Event {
    /// All events in display order
    pub const ALL: [Event; 4] = [Event::ShotPut, Event::Discus, Event::Hammer, Event::Javelin];

    /// Stable identifier used in files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ShotPut => "shot-put",
            Event::Discus => "discus",
            Event::Hammer => "hammer",
            Event::Javelin => "javelin",
        }
    }
}

/// Kind of training session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Technique,
    Power,
    Competition,
    Recovery,
}

impl SessionType {
    pub const ALL: [SessionType; 4] = [
        SessionType::Technique,
        SessionType::Power,
        SessionType::Competition,
        SessionType::Recovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Technique => "technique",
            SessionType::Power => "power",
            SessionType::Competition => "competition",
            SessionType::Recovery => "recovery",
        }
    }
}

/// Competition season a session belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Indoor,
    Outdoor,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Indoor, Season::Outdoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Indoor => "indoor",
            Season::Outdoor => "outdoor",
        }
    }
}

/// Unit of an implement weight
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    G,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::G => "g",
        }
    }
}

/// Unit of a throw distance
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    M,
    Ft,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::M => "m",
            DistanceUnit::Ft => "ft",
        }
    }
}

macro_rules! impl_text_enum {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_lowercase();
                Self::variants()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| Error::Validation(format!("unknown {}: {}", $what, s)))
            }
        }
    };
}

impl Event {
    fn variants() -> &'static [Event] {
        &Event::ALL
    }
}

impl SessionType {
    fn variants() -> &'static [SessionType] {
        &SessionType::ALL
    }
}

impl Season {
    fn variants() -> &'static [Season] {
        &Season::ALL
    }
}

impl WeightUnit {
    fn variants() -> &'static [WeightUnit] {
        &[WeightUnit::Kg, WeightUnit::G]
    }
}

impl DistanceUnit {
    fn variants() -> &'static [DistanceUnit] {
        &[DistanceUnit::M, DistanceUnit::Ft]
    }
}

impl_text_enum!(Event, "event");
impl_text_enum!(SessionType, "session type");
impl_text_enum!(Season, "season");
impl_text_enum!(WeightUnit, "weight unit");
impl_text_enum!(DistanceUnit, "distance unit");

// ============================================================================
// Session Types
// ============================================================================

/// A recorded throwing session
///
/// Records are immutable once created; the only supported edit is deletion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ThrowSession {
    pub id: Uuid,
    pub date: NaiveDate,
    pub event: Event,
    pub session_type: SessionType,
    pub season: Season,
    pub throw_count: u32,
    pub implement_weight: f64,
    pub weight_unit: WeightUnit,
    pub rpe: u8,
    pub pr_day: bool,
    #[serde(default)]
    pub pr_distance: Option<f64>,
    #[serde(default)]
    pub distance_unit: Option<DistanceUnit>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub coach_notes: String,
    pub created_at: DateTime<Utc>,
}

impl ThrowSession {
    /// Check the record invariants
    pub fn validate(&self) -> Result<()> {
        validate_fields(self.throw_count, self.rpe, self.pr_day, self.pr_distance)
    }
}

/// Input for a new session, before an id and creation time are assigned
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewThrowSession {
    pub date: NaiveDate,
    pub event: Event,
    pub session_type: SessionType,
    pub season: Season,
    pub throw_count: u32,
    pub implement_weight: f64,
    pub weight_unit: WeightUnit,
    pub rpe: u8,
    pub pr_day: bool,
    pub pr_distance: Option<f64>,
    pub distance_unit: Option<DistanceUnit>,
    pub notes: String,
    pub coach_notes: String,
}

impl NewThrowSession {
    pub fn validate(&self) -> Result<()> {
        validate_fields(self.throw_count, self.rpe, self.pr_day, self.pr_distance)
    }

    /// Turn the input into a stored record with a fresh id
    ///
    /// PR distance and unit are dropped unless the session is a PR day.
    pub fn into_session(self, now: DateTime<Utc>) -> ThrowSession {
        let (pr_distance, distance_unit) = if self.pr_day {
            (self.pr_distance, self.distance_unit)
        } else {
            (None, None)
        };

        ThrowSession {
            id: Uuid::new_v4(),
            date: self.date,
            event: self.event,
            session_type: self.session_type,
            season: self.season,
            throw_count: self.throw_count,
            implement_weight: self.implement_weight,
            weight_unit: self.weight_unit,
            rpe: self.rpe,
            pr_day: self.pr_day,
            pr_distance,
            distance_unit,
            notes: self.notes,
            coach_notes: self.coach_notes,
            created_at: now,
        }
    }
}

fn validate_fields(
    throw_count: u32,
    rpe: u8,
    pr_day: bool,
    pr_distance: Option<f64>,
) -> Result<()> {
    if throw_count == 0 {
        return Err(Error::Validation("throw count must be at least 1".into()));
    }

    if !(RPE_MIN..=RPE_MAX).contains(&rpe) {
        return Err(Error::Validation(format!(
            "RPE must be between {} and {}, got {}",
            RPE_MIN, RPE_MAX, rpe
        )));
    }

    if !pr_day && pr_distance.is_some() {
        return Err(Error::Validation(
            "PR distance given for a session that is not a PR day".into(),
        ));
    }

    if let Some(distance) = pr_distance {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(Error::Validation(format!(
                "PR distance must be positive, got {}",
                distance
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Filter Type
// ============================================================================

/// Criteria for narrowing a session list
///
/// `None` for a field means "all".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionFilter {
    pub event: Option<Event>,
    pub season: Option<Season>,
    pub session_type: Option<SessionType>,
    pub pr_only: bool,
}

impl SessionFilter {
    pub fn matches(&self, session: &ThrowSession) -> bool {
        self.event.map_or(true, |e| session.event == e)
            && self.season.map_or(true, |s| session.season == s)
            && self.session_type.map_or(true, |t| session.session_type == t)
            && (!self.pr_only || session.pr_day)
    }
}
