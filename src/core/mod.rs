//! Core application functionality
//!
//! This module contains the application shell around the conversion
//! pipeline:
//! - CLI argument parsing
//! - User configuration file
//! - Error types
//! - Running the selected command

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::{ConvertError, ConvertResult};
pub use runner::run_app;
