//! Diagnostic JSONL trace of vote reports.
//!
//! Opt-in debugging aid: each report is serialized as a single JSON line with
//! a `type` field and `timestamp`, appended via a buffered writer. Nothing
//! reads the file back; decisions are not kept across attempts.

use refbox_application::ports::authority::AuthorityNotifier;
use refbox_domain::{SurfaceId, VoteReport};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Debug trace of vote reports, one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlVoteLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlVoteLog {
    /// Open the log for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create vote log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open vote log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuthorityNotifier for JsonlVoteLog {
    fn report_votes(&self, origin: SurfaceId, report: &VoteReport) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = serde_json::json!({
            "type": "vote_report",
            "timestamp": timestamp,
            "surface": origin,
            "votes": report.votes,
            "times": report.times,
            "majority": report.majority(),
            "decision": report.final_value(),
        });

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not append to vote log {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlVoteLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refbox_domain::Vote;
    use std::io::Read;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .trim()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_vote_log_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.jsonl");
        let log = JsonlVoteLog::new(&path).unwrap();

        log.report_votes(
            SurfaceId(1),
            &VoteReport::new([Vote::White, Vote::Unset, Vote::Unset], [100, 0, 0]),
        );
        log.report_votes(
            SurfaceId(1),
            &VoteReport::new([Vote::White, Vote::Red, Vote::Red], [100, 180, 240]),
        );
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["type"], "vote_report");
            assert!(line.get("timestamp").is_some());
            assert_eq!(line["surface"], 1);
        }

        assert_eq!(lines[0]["votes"], serde_json::json!(["white", "unset", "unset"]));
        assert_eq!(lines[0]["decision"], "unknown");

        assert_eq!(lines[1]["times"], serde_json::json!([100, 180, 240]));
        assert_eq!(lines[1]["majority"], "red");
        assert_eq!(lines[1]["decision"], "red");
    }

    #[test]
    fn test_vote_log_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("votes.jsonl");

        for _ in 0..2 {
            let log = JsonlVoteLog::new(&path).unwrap();
            log.report_votes(SurfaceId(2), &VoteReport::default());
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_vote_log_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.jsonl");
        let log = JsonlVoteLog::new(&path).unwrap();
        assert_eq!(log.path(), path.as_path());
    }
}
