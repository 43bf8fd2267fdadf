//! Command-line interface and orchestration for buildrank
//!
//! This module implements the CLI commands and drives the other modules to
//! perform an end-to-end analysis of a configuration tree. It handles argument
//! parsing, configuration management, and the high-level workflow.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **analyze**: Walk a configuration tree, flatten and measure every file, score
//!   and rank the entities, and write the requested tables
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and value ranges
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The analyze command:
//!
//! 1. Loads the configuration and sets up logging
//! 2. Discovers entity folders with `corpus`
//! 3. Parses each file once, then flattens it (`inventory`), measures it
//!    (`metrics`), and lists its steps (`coverage`)
//! 4. Scores all entities together with `scoring`
//! 5. Renders the selected tables and writes them with `reports`
//!
//! A file that fails to parse is reported and skipped; it never fails the run.
//! Configuration errors and report I/O errors do.

mod analyze;
mod common;
mod config;
mod host;
mod init;
mod run;
mod validate;

pub use analyze::{Analysis, AnalyzeArgs, SkippedFile, analyze, analyze_root};
pub use common::{ColorMode, LogLevel};
pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML, Scoring};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
