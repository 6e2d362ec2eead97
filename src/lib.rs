//! Glossa - hardcoded text finder and locale consistency checker
//!
//! Glossa is a CLI tool and library that finds user-facing text in application
//! source code that bypasses the translation layer, suggests translation keys
//! for it, and verifies that every locale catalog defines the same keys as the
//! reference language.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, reporting, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (extraction and locale consistency)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
