//! Text generation adapters.

mod openai;
mod types;

pub use openai::OpenAiGenerator;
