//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Find hardcoded user-facing text in source files
//! - `locales`: Compare locale catalogs against the source language
//! - `check`: Run both of the above
//! - `init`: Create a `.glossarc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::framework::FrameworkSetting;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|c| c.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Scan(cmd)) => Some(&cmd.common),
            Some(Command::Locales(cmd)) => Some(&cmd.common),
            Some(Command::Check(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Common arguments shared by all analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale catalogs directory (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Reference language for catalog comparison (overrides config file)
    #[arg(long)]
    pub source_language: Option<String>,

    /// Framework tag or `auto` (overrides config file)
    #[arg(long)]
    pub framework: Option<FrameworkSetting>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write report.json into this directory (config `outputDir` when no value is given)
    #[arg(long, num_args = 0..=1, value_name = "DIR")]
    pub output: Option<Option<PathBuf>>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Source scan tuning shared by `scan` and `check`.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Also scan test files
    #[arg(long)]
    pub include_tests: bool,

    /// Minimum length of extracted text (overrides config file)
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum length of extracted text (overrides config file)
    #[arg(long)]
    pub max_length: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct LocalesCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find hardcoded user-facing text and suggest translation keys
    Scan(ScanCommand),
    /// Check locale catalogs for missing, extra and untranslated keys
    Locales(LocalesCommand),
    /// Run the source scan and the locale check together
    Check(CheckCommand),
    /// Initialize a new .glossarc.json configuration file
    Init,
}
