//! Legal document retrieval from TOML (`[retrieval]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Index the documents directory at each trial start
    pub enabled: bool,
    /// Directory of plain-text legal documents
    pub documents_dir: String,
    /// Passages returned per query
    pub max_passages: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            documents_dir: "legal_docs".to_string(),
            max_passages: 3,
        }
    }
}
