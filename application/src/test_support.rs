//! Test doubles for the application ports.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::retrieval::{
    RetrievalError, RetrievalInitializer, RetrievalPort, RetrievalResponse,
};
use crate::ports::text_generation::{GenerationError, GenerationParams, TextGenerator};
use crate::ports::transcript_store::{PersistenceError, TranscriptStore};
use async_trait::async_trait;
use courtroom_domain::TrialRecord;
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&str) -> Result<String, GenerationError> + Send + Sync>;

/// Generator whose replies come from a closure over the prompt.
///
/// Every prompt and its parameters are recorded for later assertions.
pub struct ScriptedGenerator {
    handler: Handler,
    pub calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl ScriptedGenerator {
    pub fn new(
        handler: impl Fn(&str) -> Result<String, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn constant(reply: &'static str) -> Self {
        Self::new(move |_| Ok(reply.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts().pop()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push((prompt.to_string(), params));
        (self.handler)(prompt)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Retrieval index that answers every query the same way.
pub struct FakeRetrieval {
    pub reply: Result<String, RetrievalError>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeRetrieval {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(RetrievalError::QueryFailed("index offline".to_string())),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RetrievalPort for FakeRetrieval {
    async fn query(&self, question: &str) -> Result<RetrievalResponse, RetrievalError> {
        self.queries.lock().unwrap().push(question.to_string());
        self.reply.clone().map(RetrievalResponse::new)
    }
}

/// Initializer handing out a prepared index, nothing, or an error.
pub struct FakeInitializer(pub Result<Option<Arc<FakeRetrieval>>, RetrievalError>);

#[async_trait]
impl RetrievalInitializer for FakeInitializer {
    async fn initialize(&self) -> Result<Option<Arc<dyn RetrievalPort>>, RetrievalError> {
        match &self.0 {
            Ok(Some(index)) => Ok(Some(index.clone() as Arc<dyn RetrievalPort>)),
            Ok(None) => Ok(None),
            Err(e) => Err(e.clone()),
        }
    }
}

/// Transcript store that keeps saved records in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Mutex<Vec<TrialRecord>>,
}

impl TranscriptStore for MemoryStore {
    fn save(&self, record: &TrialRecord) -> Result<PathBuf, PersistenceError> {
        self.saved.lock().unwrap().push(record.clone());
        Ok(PathBuf::from("transcripts").join(record.file_name()))
    }
}

/// Transcript store whose every write fails.
pub struct FailingStore;

impl TranscriptStore for FailingStore {
    fn save(&self, record: &TrialRecord) -> Result<PathBuf, PersistenceError> {
        Err(PersistenceError::Io {
            path: PathBuf::from("/read-only").join(record.file_name()),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"),
        })
    }
}

/// Conversation logger that keeps every event.
#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
