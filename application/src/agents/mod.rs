//! Courtroom role agents
//!
//! Each agent renders its prompts from the shared [`PromptTemplates`](courtroom_domain::PromptTemplates)
//! and calls the injected [`TextGenerator`](crate::ports::text_generation::TextGenerator).
//! Generation and retrieval failures are absorbed here, so agent methods
//! always return usable text.

pub mod base;
pub mod judge;
pub mod jury;
pub mod prosecutor;
pub mod witness;

pub use base::AgentCore;
pub use judge::Judge;
pub use jury::{DeliberationPolicy, FixedDeliberation, Jury, JuryNotes, RandomDeliberation};
pub use prosecutor::Prosecutor;
pub use witness::Witness;
