//! Append-only trial transcript.

use super::entities::TranscriptEntry;

/// Chronological log of every exchange in a trial.
///
/// Entries and their flattened `"speaker: content"` history lines are pushed
/// together, so both sequences always have the same length. Nothing is ever
/// reordered or edited after it is appended.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    history: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time and return it.
    pub fn record(
        &mut self,
        speaker: impl Into<String>,
        content: impl Into<String>,
    ) -> &TranscriptEntry {
        self.push(TranscriptEntry::now(speaker, content))
    }

    /// Append a prepared entry and return it.
    pub fn push(&mut self, entry: TranscriptEntry) -> &TranscriptEntry {
        self.history.push(entry.history_line());
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Flattened history lines, one per entry.
    pub fn history_lines(&self) -> &[String] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newline-joined `"speaker: content"` lines, used as model context.
    pub fn interaction_history(&self) -> String {
        self.history.join("\n")
    }

    /// Newline-joined lines with timestamps, used for deliberation.
    pub fn formatted(&self) -> String {
        self.entries
            .iter()
            .map(TranscriptEntry::timestamped_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Entries spoken by `speaker`, in order.
    pub fn by_speaker<'a>(&'a self, speaker: &'a str) -> impl Iterator<Item = &'a TranscriptEntry> {
        self.entries.iter().filter(move |e| e.speaker == speaker)
    }
}
