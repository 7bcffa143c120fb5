//! Application-level configuration.
//!
//! - [`TrialSettings`]: round limits, response length and sampling
//!   parameters shared by every role of a trial

pub mod trial_settings;

pub use trial_settings::TrialSettings;
