//! Configuration file loading for courtroom
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./courtroom.toml` or `./.courtroom.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/courtroom/config.toml`
//! 4. `COURTROOM_*` environment variables
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEvaluationConfig, FileLoggingConfig, FileModelConfig,
    FileRetrievalConfig, FileTrialConfig,
};
pub use loader::ConfigLoader;
