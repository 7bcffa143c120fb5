//! Keyword index over a directory of plain-text legal documents
//!
//! Documents are split into blank-line separated passages. A query is
//! reduced to its significant terms and answered with the passages that
//! mention the most of them.

use async_trait::async_trait;
use courtroom_application::ports::retrieval::{
    RetrievalError, RetrievalInitializer, RetrievalPort, RetrievalResponse,
};
use glob::glob;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

/// File extensions treated as documents
const DOCUMENT_EXTENSIONS: [&str; 3] = ["txt", "md", "text"];

/// Documents larger than this are skipped (2 MB)
const MAX_DOCUMENT_SIZE: u64 = 2 * 1024 * 1024;

/// Returned when nothing in the corpus matches a query
pub const NO_MATCHING_PASSAGES: &str = "No matching passages found in the legal documents.";

static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]{3,}").expect("valid regex"));

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "were", "with", "that", "this", "what", "which", "from",
    "following", "based", "there", "any", "given", "its", "has", "have", "had", "not", "but",
    "into", "about", "your", "you", "they", "their", "his", "her", "she", "him", "who", "whom",
    "how", "why", "when", "where", "does", "did", "can", "could", "would", "should", "will",
    "context", "history", "statement", "relevant", "documents", "interaction",
];

/// Lowercased significant terms of `text`, without duplicates.
fn terms(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    TERM.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
struct Passage {
    source: String,
    text: String,
    terms: HashSet<String>,
}

/// In-memory passage index answering queries by term overlap.
#[derive(Debug, Clone)]
pub struct LocalDocumentIndex {
    passages: Vec<Passage>,
    max_passages: usize,
}

impl LocalDocumentIndex {
    pub fn new(max_passages: usize) -> Self {
        Self {
            passages: Vec::new(),
            max_passages: max_passages.max(1),
        }
    }

    /// Add one document, split into passages.
    pub fn add_document(&mut self, source: impl Into<String>, content: &str) {
        let source = source.into();
        for paragraph in PARAGRAPH_BREAK.split(content) {
            let text = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                continue;
            }
            self.passages.push(Passage {
                source: source.clone(),
                terms: terms(&text),
                text,
            });
        }
    }

    /// Index every document file under `dir` (recursively).
    pub fn load_dir(dir: &Path, max_passages: usize) -> Result<Self, RetrievalError> {
        let pattern = format!("{}/**/*", dir.display());
        let entries = glob(&pattern)
            .map_err(|e| RetrievalError::Load(format!("Invalid documents path: {}", e)))?;

        let mut index = Self::new(max_passages);
        let mut documents = 0;
        let mut last_failure = None;

        for path in entries.flatten() {
            if !is_document(&path) {
                continue;
            }
            // Invalid UTF-8 is replaced rather than rejected
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Skipping unreadable document {}: {}", path.display(), e);
                    last_failure = Some(format!("{}: {}", path.display(), e));
                    continue;
                }
            };

            let source = path
                .strip_prefix(dir)
                .unwrap_or(&path)
                .display()
                .to_string();
            index.add_document(source, &String::from_utf8_lossy(&bytes));
            documents += 1;
        }

        if documents == 0
            && let Some(failure) = last_failure
        {
            return Err(RetrievalError::Load(failure));
        }

        debug!(documents, passages = index.passages.len(), "Documents indexed");
        Ok(index)
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Best matching passages for `question`, most relevant first.
    fn search(&self, question: &str) -> Vec<&Passage> {
        let wanted = terms(question);

        let mut scored: Vec<(usize, usize, &Passage)> = self
            .passages
            .iter()
            .enumerate()
            .map(|(position, p)| (p.terms.intersection(&wanted).count(), position, p))
            .filter(|(score, _, _)| *score > 0)
            .collect();

        // Highest overlap first; ties keep document order
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(self.max_passages)
            .map(|(_, _, p)| p)
            .collect()
    }
}

fn is_document(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e.to_lowercase().as_str()));

    has_extension
        && fs::metadata(path)
            .map(|m| m.is_file() && m.len() <= MAX_DOCUMENT_SIZE)
            .unwrap_or(false)
}

#[async_trait]
impl RetrievalPort for LocalDocumentIndex {
    async fn query(&self, question: &str) -> Result<RetrievalResponse, RetrievalError> {
        let matches = self.search(question);
        if matches.is_empty() {
            return Ok(RetrievalResponse::new(NO_MATCHING_PASSAGES));
        }

        let text = matches
            .iter()
            .map(|p| format!("[{}] {}", p.source, p.text))
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(RetrievalResponse::new(text))
    }
}

/// Builds a [`LocalDocumentIndex`] from a documents directory at trial start.
#[derive(Debug, Clone)]
pub struct LocalDocumentSource {
    dir: PathBuf,
    max_passages: usize,
}

impl LocalDocumentSource {
    pub fn new(dir: impl Into<PathBuf>, max_passages: usize) -> Self {
        Self {
            dir: dir.into(),
            max_passages,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl RetrievalInitializer for LocalDocumentSource {
    async fn initialize(&self) -> Result<Option<Arc<dyn RetrievalPort>>, RetrievalError> {
        if !self.dir.is_dir() {
            info!("Documents directory {} does not exist", self.dir.display());
            return Ok(None);
        }

        let dir = self.dir.clone();
        let max_passages = self.max_passages;
        let index =
            tokio::task::spawn_blocking(move || LocalDocumentIndex::load_dir(&dir, max_passages))
                .await
                .map_err(|e| RetrievalError::Load(e.to_string()))??;

        if index.is_empty() {
            info!("Documents directory {} is empty", self.dir.display());
            return Ok(None);
        }

        info!(
            passages = index.passage_count(),
            "Indexed legal documents from {}",
            self.dir.display()
        );
        Ok(Some(Arc::new(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PENAL_CODE: &str = "Section 484. Theft is the unlawful taking of property of another.\n\n\
                              Section 487. Grand theft is theft of property exceeding $950.\n\n\
                              Section 459. Burglary is entry with intent to commit larceny.";

    const EVIDENCE_RULES: &str = "Rule 802. Hearsay is not admissible except as provided by law.\n\n\
                                  Rule 611. The court controls the mode of examining witnesses.";

    fn index() -> LocalDocumentIndex {
        let mut index = LocalDocumentIndex::new(2);
        index.add_document("penal_code.txt", PENAL_CODE);
        index.add_document("evidence.md", EVIDENCE_RULES);
        index
    }

    #[test]
    fn test_documents_split_into_passages() {
        assert_eq!(index().passage_count(), 5);
    }

    #[test]
    fn test_terms_drop_stopwords_and_short_words() {
        let terms = terms("What is the relevance of the THEFT at 9pm?");
        assert!(terms.contains("theft"));
        assert!(terms.contains("9pm"));
        assert!(!terms.contains("the"));
        assert!(!terms.contains("is"));
    }

    #[tokio::test]
    async fn test_query_ranks_by_overlap() {
        let response = index()
            .query("Is grand theft of property a felony?")
            .await
            .unwrap();

        let passages: Vec<&str> = response.response_text.split("\n\n").collect();
        assert_eq!(passages.len(), 2);
        assert!(passages[0].starts_with("[penal_code.txt] Section 487. Grand theft"));
        assert!(passages[1].starts_with("[penal_code.txt] Section 484."));
    }

    #[tokio::test]
    async fn test_query_without_matches() {
        let response = index().query("maritime salvage").await.unwrap();
        assert_eq!(response.response_text, NO_MATCHING_PASSAGES);
    }

    #[tokio::test]
    async fn test_source_loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("evidence.md"), EVIDENCE_RULES).unwrap();
        fs::create_dir(dir.path().join("statutes")).unwrap();
        fs::write(dir.path().join("statutes").join("penal_code.txt"), PENAL_CODE).unwrap();
        fs::write(dir.path().join("scan.pdf"), [0u8, 159, 146, 150]).unwrap();

        let index = LocalDocumentSource::new(dir.path(), 3)
            .initialize()
            .await
            .unwrap()
            .expect("documents present");

        let response = index.query("Is hearsay admissible?").await.unwrap();
        assert!(response.response_text.starts_with("[evidence.md] Rule 802."));
    }

    #[tokio::test]
    async fn test_invalid_utf8_document_does_not_disable_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("penal.txt"), PENAL_CODE).unwrap();
        fs::write(dir.path().join("scan.txt"), b"burglary fo\xff\xfeo notes").unwrap();

        let index = LocalDocumentIndex::load_dir(dir.path(), 3).unwrap();
        assert_eq!(index.passage_count(), 4);

        let retrieval = LocalDocumentSource::new(dir.path(), 3)
            .initialize()
            .await
            .unwrap()
            .expect("valid documents still indexed");
        let response = retrieval.query("grand theft").await.unwrap();
        assert!(response.response_text.starts_with("[penal.txt] Section 487."));
    }

    #[tokio::test]
    async fn test_missing_or_empty_directory_disables_retrieval() {
        let dir = tempfile::tempdir().unwrap();
        let missing = LocalDocumentSource::new(dir.path().join("legal_docs"), 3);
        assert!(missing.initialize().await.unwrap().is_none());

        let empty = LocalDocumentSource::new(dir.path(), 3);
        assert!(empty.initialize().await.unwrap().is_none());
    }
}
