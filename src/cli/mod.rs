// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for fusing detector recordings.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! console logging and the `fuse` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Fusion command.
pub mod fuse;

/// Console logging macros and verbosity flag.
pub mod logging;
