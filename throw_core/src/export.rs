//! CSV and JSON export of the session history.

use crate::load::compute_load;
use crate::state::StreakRecord;
use crate::{Config, Error, Result, ThrowSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Version tag written into JSON backups
pub const BACKUP_VERSION: &str = "1.0.0";

/// A row in the CSV output
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Event")]
    event: &'static str,
    #[serde(rename = "Session Type")]
    session_type: &'static str,
    #[serde(rename = "Season")]
    season: &'static str,
    #[serde(rename = "Throws")]
    throws: u32,
    #[serde(rename = "Implement Weight")]
    implement_weight: f64,
    #[serde(rename = "Weight Unit")]
    weight_unit: &'static str,
    #[serde(rename = "RPE")]
    rpe: u8,
    #[serde(rename = "PR Day")]
    pr_day: &'static str,
    #[serde(rename = "PR Distance")]
    pr_distance: Option<f64>,
    #[serde(rename = "Distance Unit")]
    distance_unit: Option<&'static str>,
    #[serde(rename = "Notes")]
    notes: &'a str,
    #[serde(rename = "Coach Notes")]
    coach_notes: &'a str,
    #[serde(rename = "Load (Throws × RPE)")]
    load: u64,
}

impl<'a> From<&'a ThrowSession> for CsvRow<'a> {
    fn from(session: &'a ThrowSession) -> Self {
        CsvRow {
            date: session.date.format("%Y-%m-%d").to_string(),
            event: session.event.display_name(),
            session_type: session.session_type.as_str(),
            season: session.season.as_str(),
            throws: session.throw_count,
            implement_weight: session.implement_weight,
            weight_unit: session.weight_unit.as_str(),
            rpe: session.rpe,
            pr_day: if session.pr_day { "Yes" } else { "No" },
            pr_distance: session.pr_distance,
            distance_unit: session.distance_unit.map(|u| u.as_str()),
            notes: &session.notes,
            coach_notes: &session.coach_notes,
            load: compute_load(session),
        }
    }
}

/// Write sessions as CSV with a header row
///
/// Returns the number of rows written. Fields containing commas, quotes or
/// newlines are quoted by the writer.
pub fn write_csv<'a, W, I>(sessions: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ThrowSession>,
{
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);

    let mut count = 0;
    for session in sessions {
        writer.serialize(CsvRow::from(session))?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

/// Export sessions to a CSV file
///
/// Exporting nothing is an error so the caller can tell the user instead of
/// producing a header-only file.
pub fn export_csv(sessions: &[&ThrowSession], path: &Path) -> Result<usize> {
    if sessions.is_empty() {
        return Err(Error::Other("No sessions to export".into()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let count = write_csv(sessions.iter().copied(), file)?;

    tracing::info!("Exported {} sessions to {:?}", count, path);
    Ok(count)
}

/// Full data backup
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Backup {
    pub sessions: Vec<ThrowSession>,
    pub settings: Config,
    pub streak: StreakRecord,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl Backup {
    pub fn new(
        sessions: Vec<ThrowSession>,
        settings: Config,
        streak: StreakRecord,
        export_date: DateTime<Utc>,
    ) -> Self {
        Self {
            sessions,
            settings,
            streak,
            export_date,
            version: BACKUP_VERSION.to_string(),
        }
    }
}

/// Write a pretty-printed JSON backup
pub fn export_json(backup: &Backup, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(backup)?;
    std::fs::write(path, contents)?;

    tracing::info!(
        "Exported backup of {} sessions to {:?}",
        backup.sessions.len(),
        path
    );
    Ok(())
}
