//! JSON file store for finished trials.

use courtroom_application::ports::transcript_store::{PersistenceError, TranscriptStore};
use courtroom_domain::TrialRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes each trial as `trial_<timestamp>.json` under one directory.
///
/// The record is written to a hidden temporary file first and renamed
/// into place, so a crash never leaves a truncated transcript behind.
#[derive(Debug, Clone)]
pub struct JsonTranscriptStore {
    dir: PathBuf,
}

impl JsonTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First unused file name for `record`: `trial_<timestamp>.json`, then
    /// `trial_<timestamp>_1.json` and so on when trials end in the same second.
    fn free_file_name(&self, record: &TrialRecord) -> String {
        let file_name = record.file_name();
        if !self.dir.join(&file_name).exists() {
            return file_name;
        }
        let stem = file_name.trim_end_matches(".json").to_string();
        (1..)
            .map(|n| format!("{}_{}.json", stem, n))
            .find(|candidate| !self.dir.join(candidate).exists())
            .unwrap_or(file_name)
    }
}

impl TranscriptStore for JsonTranscriptStore {
    fn save(&self, record: &TrialRecord) -> Result<PathBuf, PersistenceError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| PersistenceError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let json = serde_json::to_string_pretty(record)?;
        let file_name = self.free_file_name(record);
        let path = self.dir.join(&file_name);
        let staging = self.dir.join(format!(".{}.tmp", file_name));

        fs::write(&staging, json).map_err(io_error(&staging))?;
        commit(&staging, &path)?;

        info!("Trial transcript saved to {}", path.display());
        Ok(path)
    }
}

/// Move the staged file into place; the staging file never outlives a failure.
fn commit(staging: &Path, path: &Path) -> Result<(), PersistenceError> {
    fs::rename(staging, path).map_err(|source| {
        let _ = fs::remove_file(staging);
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use courtroom_domain::{ScoreEntry, TrialState, WitnessRecord};

    fn load(path: &Path) -> TrialRecord {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    fn record() -> TrialRecord {
        record_for("Theft case")
    }

    fn record_for(case: &str) -> TrialRecord {
        let mut state = TrialState::begin(case);
        state.add_witness(WitnessRecord::new("Alice", "I saw the defendant at 9pm"));
        state.add_evidence("Exhibit A", "security footage");
        state
            .transcript
            .record("System", format!("Trial started for case: {}", case));
        state.transcript.record("Prosecutor", "The defendant was seen at the scene.");
        state.performance.case_description_eval = ScoreEntry::skipped();

        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        TrialRecord::capture(&state, at)
    }

    #[test]
    fn test_save_creates_directory_and_named_file() {
        let root = tempfile::tempdir().unwrap();
        let store = JsonTranscriptStore::new(root.path().join("transcripts"));

        let path = store.save(&record()).unwrap();

        assert_eq!(path, root.path().join("transcripts/trial_20240305_140709.json"));
        assert!(path.is_file());
        let leftovers: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_saved_file_uses_record_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTranscriptStore::new(dir.path());
        let path = store.save(&record()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["trialProceedings"][1]["speaker"], "Prosecutor");
        assert_eq!(value["metadata"]["timestamp"], "20240305_140709");
        assert_eq!(value["metadata"]["witnessNames"][0], "Alice");
        assert!(value["performanceEvaluation"]["defenseStatementEvals"].is_array());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTranscriptStore::new(dir.path());
        let original = record();
        let path = store.save(&original).unwrap();

        assert_eq!(load(&path), original);
    }

    #[test]
    fn test_trials_ending_in_same_second_keep_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTranscriptStore::new(dir.path());
        let theft = record_for("Theft case");
        let fraud = record_for("Fraud case");

        let first = store.save(&theft).unwrap();
        let second = store.save(&fraud).unwrap();
        let third = store.save(&theft).unwrap();

        assert_eq!(first, dir.path().join("trial_20240305_140709.json"));
        assert_eq!(second, dir.path().join("trial_20240305_140709_1.json"));
        assert_eq!(third, dir.path().join("trial_20240305_140709_2.json"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
        assert_eq!(load(&first).metadata.case_context, "Theft case");
        assert_eq!(load(&second).metadata.case_context, "Fraud case");
    }

    #[test]
    fn test_failed_commit_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join(".trial_20240305_140709.json.tmp");
        fs::write(&staging, "{}").unwrap();
        let target = dir.path().join("missing").join("trial_20240305_140709.json");

        let err = commit(&staging, &target).unwrap_err();

        assert!(matches!(err, PersistenceError::Io { ref path, .. } if *path == target));
        assert!(!staging.exists());
    }

    #[test]
    fn test_unwritable_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("transcripts");
        fs::write(&blocker, "not a directory").unwrap();

        let err = JsonTranscriptStore::new(&blocker).save(&record()).unwrap_err();
        match err {
            PersistenceError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {other}"),
        }
    }
}
