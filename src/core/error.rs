//! Error and warning types for the analysis engine.
//!
//! Errors are split by blast radius:
//! - `ScanError`: fatal, returned before any result is produced (missing roots)
//!   or per file (unreadable source), which the orchestrator downgrades to a warning.
//! - `ScanWarning`: recoverable notices collected alongside a partial result.

use std::{fmt, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("source directory '{}' does not exist", .0.display())]
    SourceRootMissing(PathBuf),

    #[error("locales directory '{}' does not exist", .0.display())]
    LocaleRootMissing(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("reference language '{language}' not found in '{}' (available: {available})", root.display())]
    ReferenceNotFound {
        language: String,
        root: PathBuf,
        available: String,
    },

    #[error("no languages found in '{}'", .0.display())]
    NoLanguages(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Category of a recoverable problem encountered during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A source file could not be read (permissions, invalid UTF-8).
    UnreadableFile,
    /// A directory entry could not be accessed while walking.
    InaccessiblePath,
    /// A pattern rule failed to compile and was skipped.
    InvalidRule,
    /// A locale catalog file could not be parsed.
    MalformedCatalog,
    /// Two catalog files claim the same language slot; the first one is kept.
    DuplicateCatalog,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnreadableFile => write!(f, "unreadable-file"),
            WarningKind::InaccessiblePath => write!(f, "inaccessible-path"),
            WarningKind::InvalidRule => write!(f, "invalid-rule"),
            WarningKind::MalformedCatalog => write!(f, "malformed-catalog"),
            WarningKind::DuplicateCatalog => write!(f, "duplicate-catalog"),
        }
    }
}

/// A skip/warning notice handed back to the caller with the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub kind: WarningKind,
    /// File path, or rule id for `InvalidRule`.
    pub subject: String,
    pub message: String,
}

impl ScanWarning {
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.subject, self.message, self.kind)
    }
}
