//! Append-only audit log
//!
//! One JSON entry per line. Entries are flushed as they are written and
//! never rewritten.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{PennywiseError, PennywiseResult};

use super::entry::{AuditEntry, AuditEvent};

/// The audit log file
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Record an event, stamped with the current time
    pub fn append(&self, event: AuditEvent) -> PennywiseResult<()> {
        let line = serde_json::to_string(&AuditEntry::now(event))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PennywiseError::Io(format!("Failed to open audit log: {}", e)))?;
        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| PennywiseError::Io(format!("Failed to write audit log: {}", e)))
    }

    /// The last `limit` entries, oldest first, and how many were logged in all
    ///
    /// Only the returned entries are parsed.
    pub fn recent(&self, limit: usize) -> PennywiseResult<(Vec<AuditEntry>, usize)> {
        if !self.path.exists() {
            return Ok((Vec::new(), 0));
        }

        let file = File::open(&self.path)
            .map_err(|e| PennywiseError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut total = 0;
        let mut tail: VecDeque<(usize, String)> = VecDeque::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .map_err(|e| PennywiseError::Io(format!("Failed to read audit log: {}", e)))?;
            if line.trim().is_empty() {
                continue;
            }
            total += 1;
            if limit == 0 {
                continue;
            }
            if tail.len() == limit {
                tail.pop_front();
            }
            tail.push_back((index + 1, line));
        }

        let entries = tail
            .into_iter()
            .map(|(line_no, line)| {
                serde_json::from_str(&line).map_err(|e| {
                    PennywiseError::Json(format!("Bad audit entry on line {}: {}", line_no, e))
                })
            })
            .collect::<PennywiseResult<Vec<AuditEntry>>>()?;

        Ok((entries, total))
    }
}
