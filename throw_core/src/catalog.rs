//! Fixed lookup tables: display names, icons, RPE descriptors and
//! implement weight presets.
//!
//! Every label is a total `match` over its enum, so adding a variant
//! without a label is a compile error.

use crate::types::*;

impl Event {
    pub fn display_name(&self) -> &'static str {
        match self {
            Event::ShotPut => "Shot Put",
            Event::Discus => "Discus",
            Event::Hammer => "Hammer",
            Event::Javelin => "Javelin",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Event::ShotPut => "🔴",
            Event::Discus => "🟠",
            Event::Hammer => "🟡",
            Event::Javelin => "🟢",
        }
    }
}

impl SessionType {
    pub fn icon(&self) -> &'static str {
        match self {
            SessionType::Technique => "🎯",
            SessionType::Power => "💪",
            SessionType::Competition => "🏆",
            SessionType::Recovery => "🧘",
        }
    }
}

impl Season {
    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Indoor => "Indoor",
            Season::Outdoor => "Outdoor",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Season::Indoor => "🏠",
            Season::Outdoor => "☀️",
        }
    }
}

/// Verbal descriptor for an RPE value
///
/// Values outside 1-10 are clamped to the nearest end of the scale.
pub fn rpe_descriptor(rpe: u8) -> &'static str {
    match rpe.clamp(RPE_MIN, RPE_MAX) {
        1 => "Very Light",
        2 | 3 => "Light",
        4..=6 => "Moderate",
        7 | 8 => "Hard",
        9 => "Very Hard",
        _ => "Maximum",
    }
}

/// Coarse intensity band for an RPE value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RpeBand {
    Low,
    Medium,
    High,
}

impl RpeBand {
    pub fn from_rpe(rpe: u8) -> Self {
        match rpe {
            0..=4 => RpeBand::Low,
            5..=7 => RpeBand::Medium,
            _ => RpeBand::High,
        }
    }

    /// Intensity marker shown next to an RPE value
    pub fn icon(&self) -> &'static str {
        match self {
            RpeBand::Low => "🟩",
            RpeBand::Medium => "🟨",
            RpeBand::High => "🟥",
        }
    }
}

/// A standard competition or training implement
#[derive(Clone, Debug, PartialEq)]
pub struct WeightPreset {
    pub value: f64,
    pub unit: WeightUnit,
    pub label: &'static str,
}

const fn preset(value: f64, unit: WeightUnit, label: &'static str) -> WeightPreset {
    WeightPreset { value, unit, label }
}

static SHOT_PUT_PRESETS: [WeightPreset; 4] = [
    preset(7.26, WeightUnit::Kg, "7.26kg (M)"),
    preset(4.0, WeightUnit::Kg, "4kg (W)"),
    preset(6.0, WeightUnit::Kg, "6kg (HS)"),
    preset(5.0, WeightUnit::Kg, "5kg (Train)"),
];

static DISCUS_PRESETS: [WeightPreset; 4] = [
    preset(2.0, WeightUnit::Kg, "2kg (M)"),
    preset(1.0, WeightUnit::Kg, "1kg (W)"),
    preset(1.75, WeightUnit::Kg, "1.75kg (HS)"),
    preset(1.5, WeightUnit::Kg, "1.5kg (Train)"),
];

static HAMMER_PRESETS: [WeightPreset; 4] = [
    preset(7.26, WeightUnit::Kg, "7.26kg (M)"),
    preset(4.0, WeightUnit::Kg, "4kg (W)"),
    preset(6.0, WeightUnit::Kg, "6kg (Train)"),
    preset(5.0, WeightUnit::Kg, "5kg (Train)"),
];

static JAVELIN_PRESETS: [WeightPreset; 4] = [
    preset(800.0, WeightUnit::G, "800g (M)"),
    preset(600.0, WeightUnit::G, "600g (W)"),
    preset(700.0, WeightUnit::G, "700g (Train)"),
    preset(500.0, WeightUnit::G, "500g (Train)"),
];

/// Implement weight presets for an event
pub fn weight_presets(event: Event) -> &'static [WeightPreset] {
    match event {
        Event::ShotPut => &SHOT_PUT_PRESETS,
        Event::Discus => &DISCUS_PRESETS,
        Event::Hammer => &HAMMER_PRESETS,
        Event::Javelin => &JAVELIN_PRESETS,
    }
}
