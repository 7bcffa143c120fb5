//! Durable storage for finished trials.

mod json_store;

pub use json_store::JsonTranscriptStore;
