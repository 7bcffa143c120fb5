//! Command-line interface definitions

pub mod commands;
