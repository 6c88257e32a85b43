//! Append-only search history
//!
//! Each search is recorded as `{query, timestamp}`. When backed by a file the
//! whole log is rewritten as a JSON array after every append.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::TerminalResult;

/// One recorded search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

/// Search history, optionally persisted to disk
#[derive(Debug, Default)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    path: Option<PathBuf>,
}

impl QueryLog {
    /// Log that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed log, loading existing entries if the file exists
    pub fn open(path: impl AsRef<Path>) -> TerminalResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened query log");

        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// Append a query stamped with the current time
    pub fn record(&mut self, query: impl Into<String>) -> TerminalResult<&QueryLogEntry> {
        self.record_at(query, Utc::now())
    }

    /// Append a query with an explicit timestamp
    pub fn record_at(
        &mut self,
        query: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> TerminalResult<&QueryLogEntry> {
        self.entries.push(QueryLogEntry {
            query: query.into(),
            timestamp,
        });
        self.persist()?;

        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    /// Up to `n` entries, newest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> TerminalResult<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_in_memory_log() {
        let mut log = QueryLog::in_memory();
        log.record("AAPL").unwrap();
        log.record("US0378331005").unwrap();

        assert_eq!(log.len(), 2);
        assert!(log.path().is_none());

        let recent: Vec<&str> = log.recent(5).map(|e| e.query.as_str()).collect();
        assert_eq!(recent, vec!["US0378331005", "AAPL"]);
    }

    #[test]
    fn test_recent_limit() {
        let mut log = QueryLog::in_memory();
        for q in ["A", "B", "C"] {
            log.record(q).unwrap();
        }
        let recent: Vec<&str> = log.recent(2).map(|e| e.query.as_str()).collect();
        assert_eq!(recent, vec!["C", "B"]);
    }

    #[test]
    fn test_persisted_log_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history").join("queries.json");
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();

        {
            let mut log = QueryLog::open(&path).unwrap();
            assert!(log.is_empty());
            log.record_at("MSFT", timestamp).unwrap();
        }

        let mut reopened = QueryLog::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.entries()[0].query, "MSFT");
        assert_eq!(reopened.entries()[0].timestamp, timestamp);

        reopened.record("NVDA").unwrap();
        assert_eq!(QueryLog::open(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queries.json");
        fs::write(&path, "not json").unwrap();

        assert!(QueryLog::open(&path).is_err());
    }
}
