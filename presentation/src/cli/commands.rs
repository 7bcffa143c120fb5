//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for courtroom
#[derive(Parser, Debug)]
#[command(name = "courtroom")]
#[command(author, version, about = "Courtroom simulator - argue the defense against AI-driven trial roles")]
#[command(long_about = r#"
Courtroom runs an interactive trial. You play the defense; a prosecutor,
judge, witnesses and a jury are driven by a language model.

A session follows the usual order of a trial:
1. start     Describe the case, add witnesses and evidence
2. continue  The prosecution argues, the judge may comment
3. defense   Your statement, which the prosecution may object to
4. end       Closing instructions, the jury's verdict and your scores

Configuration files are loaded from (in priority order):
1. --config <path>                       Explicit config file
2. ./courtroom.toml                      Project-level config
3. ~/.config/courtroom/config.toml       Global config

The API key is read from model.api_key or the OPENAI_API_KEY environment
variable. Without a key the trial still runs with placeholder statements.

Example:
  courtroom
  courtroom --model gpt-4o --log-dir ./logs -v
"#)]
pub struct Cli {
    /// Model to use for all roles (overrides the config file)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for daily rotated diagnostic logs
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
