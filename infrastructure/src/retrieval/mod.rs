//! Document retrieval adapters.

mod local_index;

pub use local_index::{LocalDocumentIndex, LocalDocumentSource, NO_MATCHING_PASSAGES};
