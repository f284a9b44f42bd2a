//! JSONL session log.
//!
//! Sessions are appended to a JSON Lines file with file locking to ensure
//! safe concurrent access. Deletion rewrites the file atomically.
//!
//! Writers serialize on a sibling `<log>.lock` file rather than on the log
//! itself, because deletion replaces the log's inode.

use crate::{Error, Result, ThrowSession};
use fs2::FileExt;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Session sink trait for persisting sessions
pub trait SessionSink {
    fn append(&mut self, session: &ThrowSession) -> Result<()>;
}

/// JSONL-based session sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SessionSink for JsonlSink {
    fn append(&mut self, session: &ThrowSession) -> Result<()> {
        session.validate()?;
        self.ensure_parent_dir()?;

        let _lock = LogLock::exclusive(&self.path)?;

        // Opened under the lock so a concurrent delete cannot swap the file
        // out from under us
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // A crash mid-write can leave a line without its newline
        let dangling = ends_without_newline(&file)?;

        let mut writer = BufWriter::new(&file);
        if dangling {
            tracing::warn!("Session log {:?} ends with a partial line", self.path);
            writer.write_all(b"\n")?;
        }
        let line = serde_json::to_string(session)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::debug!("Appended session {} to log", session.id);
        Ok(())
    }
}

/// Advisory lock on `<log>.lock`, released on drop
struct LogLock {
    file: File,
}

impl LogLock {
    fn exclusive(log_path: &Path) -> Result<Self> {
        let file = Self::open(log_path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }

    fn shared(log_path: &Path) -> Result<Self> {
        let file = Self::open(log_path)?;
        file.lock_shared()?;
        Ok(Self { file })
    }

    fn open(log_path: &Path) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(lock_path(log_path))?;
        Ok(file)
    }
}

impl Drop for LogLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release session log lock: {}", e);
        }
    }
}

/// Path of the lock file guarding `log_path`
fn lock_path(log_path: &Path) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn ends_without_newline(file: &File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut reader = file;
    let mut last = [0u8; 1];
    reader.seek(SeekFrom::End(-1))?;
    reader.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Read all sessions from a log file
///
/// Returns sessions newest first (by date, then creation time). Blank and
/// unparseable lines are skipped with a warning; a repeated id keeps its
/// first occurrence.
pub fn read_sessions(path: &Path) -> Result<Vec<ThrowSession>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let _lock = LogLock::shared(path)?;
    read_unlocked(path)
}

fn read_unlocked(path: &Path) -> Result<Vec<ThrowSession>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let reader = BufReader::new(file);
    let mut sessions = Vec::new();
    let mut seen_ids = HashSet::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ThrowSession>(&line) {
            Ok(session) => {
                if seen_ids.insert(session.id) {
                    sessions.push(session);
                } else {
                    tracing::warn!("Duplicate session {} at line {}", session.id, line_num + 1);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to parse session at line {}: {}", line_num + 1, e);
            }
        }
    }

    sessions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    tracing::debug!("Read {} sessions from {:?}", sessions.len(), path);
    Ok(sessions)
}

/// Look up a single session by id
pub fn find_session(path: &Path, id: Uuid) -> Result<ThrowSession> {
    read_sessions(path)?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

/// Remove a session from the log
///
/// The remaining sessions are written to a temp file in the same directory
/// which then replaces the log, so a crash never leaves a half-written file.
/// The read and the replace happen under the writer lock, so no concurrent
/// append is lost.
pub fn delete_session(path: &Path, id: Uuid) -> Result<ThrowSession> {
    if !path.exists() {
        return Err(Error::NotFound(id.to_string()));
    }

    let _lock = LogLock::exclusive(path)?;

    let sessions = read_unlocked(path)?;
    let (removed, kept): (Vec<_>, Vec<_>) = sessions.into_iter().partition(|s| s.id == id);

    let removed = removed
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    rewrite_log(path, &kept)?;

    tracing::info!("Deleted session {} ({} remaining)", id, kept.len());
    Ok(removed)
}

/// Delete the whole log
pub fn clear_sessions(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    // The lock file stays: removing it would let two writers lock
    // different inodes
    let _lock = LogLock::exclusive(path)?;
    match std::fs::remove_file(path) {
        Ok(()) => tracing::info!("Removed session log {:?}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn rewrite_log(path: &Path, sessions: &[ThrowSession]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "session log path missing parent")
    })?;

    let temp = NamedTempFile::new_in(parent)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        // Oldest first so later appends keep the file chronological
        for session in sessions.iter().rev() {
            let line = serde_json::to_string(session)?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
