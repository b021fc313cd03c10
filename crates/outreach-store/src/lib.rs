//! Outreach Request Log
//!
//! Implements the RequestLog trait over a newline-delimited JSON file: one
//! LogEntry per line, appended at generation time and rewritten in full when
//! feedback is attached.
//!
//! # Examples
//!
//! ```no_run
//! use outreach_domain::traits::RequestLog;
//! use outreach_store::JsonlLog;
//!
//! let log = JsonlLog::new("outreach_log.jsonl");
//! for entry in log.recent(5).unwrap() {
//!     println!("{} {}", entry.id, entry.inputs.person_name);
//! }
//! ```

#![warn(missing_docs)]

use chrono::Utc;
use outreach_domain::traits::RequestLog;
use outreach_domain::{EntryId, LogEntry, FEEDBACK_SLOTS};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during log operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Entry could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Feedback slot outside the valid range
    #[error("Invalid feedback slot {0} (expected < {max})", max = FEEDBACK_SLOTS)]
    InvalidSlot(usize),

    /// A previous holder of the log lock panicked
    #[error("Log lock poisoned")]
    Lock,
}

/// File-backed request log
///
/// # Thread Safety
///
/// Every operation holds an internal lock, so appends and feedback rewrites
/// from one process never interleave. Other processes writing the same file
/// are not coordinated.
pub struct JsonlLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlLog {
    /// Create a log backed by `path`
    ///
    /// The file is created on first append; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::Lock)
    }

    /// Raw lines of the file without their newline; empty when it does not exist
    ///
    /// Lines stay as bytes so that invalid UTF-8 is skipped by the reader
    /// and written back verbatim by a rewrite.
    fn read_lines(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        BufReader::new(file)
            .split(b'\n')
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    /// Sibling path used for atomic rewrites
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn rewrite(&self, lines: &[Vec<u8>]) -> Result<(), StoreError> {
        let temp = self.temp_path();
        {
            let mut file = BufWriter::new(File::create(&temp)?);
            for line in lines {
                file.write_all(line)?;
                file.write_all(b"\n")?;
            }
            let file = file.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

fn parse_line(raw: &[u8]) -> Option<LogEntry> {
    let Ok(line) = std::str::from_utf8(raw) else {
        debug!("Skipping log line that is not valid UTF-8");
        return None;
    };
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(entry) => Some(entry),
        Err(e) => {
            debug!("Skipping malformed log line: {}", e);
            None
        }
    }
}

impl RequestLog for JsonlLog {
    type Error = StoreError;

    fn append(&self, entry: &LogEntry) -> Result<EntryId, Self::Error> {
        let line = serde_json::to_string(entry)?;
        let _guard = self.guard()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        debug!("Appended log entry {}", entry.id);
        Ok(entry.id.clone())
    }

    fn attach_feedback(&self, id: &EntryId, slot: usize, text: &str) -> Result<bool, Self::Error> {
        if slot >= FEEDBACK_SLOTS {
            return Err(StoreError::InvalidSlot(slot));
        }
        let _guard = self.guard()?;

        let mut lines = self.read_lines()?;
        let mut found = false;
        for line in lines.iter_mut() {
            let Some(mut entry) = parse_line(line) else {
                continue; // corrupt lines are carried over untouched
            };
            if entry.id != *id {
                continue;
            }
            entry.feedback.set(slot, text, Utc::now());
            *line = serde_json::to_vec(&entry)?;
            found = true;
            break;
        }

        if !found {
            warn!("No log entry with id {}", id);
            return Ok(false);
        }

        self.rewrite(&lines)?;
        debug!("Attached feedback to {} slot {}", id, slot);
        Ok(true)
    }

    fn recent(&self, limit: usize) -> Result<Vec<LogEntry>, Self::Error> {
        let _guard = self.guard()?;
        let entries: Vec<LogEntry> = self
            .read_lines()?
            .iter()
            .filter_map(|line| parse_line(line))
            .collect();

        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }
}
