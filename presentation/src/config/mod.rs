//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Path to the command history file
    pub history_file: Option<PathBuf>,
    /// Documents directory announced at trial start (`None` when retrieval is disabled)
    pub documents_dir: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_file: dirs::data_dir().map(|p| p.join("courtroom").join("history.txt")),
            documents_dir: None,
        }
    }
}

impl ReplConfig {
    pub fn with_documents_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.documents_dir = dir;
        self
    }
}
