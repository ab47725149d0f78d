//! LSP-compatible diagnostics for check issues
//!
//! Editors and CI annotators understand the Language Server Protocol
//! diagnostic shape, so every [`CheckIssue`] can be turned into one. Lines
//! and characters are 0-indexed here, unlike the 1-based lines stored on
//! issues.

use std::{
    collections::HashSet,
    fmt,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::report::{
    CheckIssue,
    CheckKind,
    ValidationReport,
};

/// Source tag attached to every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "gitbook-check";

/// LSP-compatible diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error that fails the check
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Position within a file (0-indexed, LSP format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line:      u32,
    /// Character offset (0-indexed, UTF-16 code units)
    pub character: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Create position from 1-indexed line number (character is 0-indexed)
    pub fn from_line_1_indexed(line: u32, character: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            character,
        }
    }
}

/// Range within a file (LSP format)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end:   Position,
}

impl Range {
    /// Create a new range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at the start of a file
    pub fn file_start() -> Self {
        Self::new(Position::new(0, 0), Position::new(0, 0))
    }

    /// Range spanning an entire 1-indexed line
    pub fn entire_line_1_indexed(line: u32) -> Self {
        Self {
            start: Position::from_line_1_indexed(line, 0),
            end:   Position::from_line_1_indexed(line, u32::MAX),
        }
    }
}

/// Individual diagnostic item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File path relative to the documentation root
    pub file:     String,
    /// Range within the file
    pub range:    Range,
    /// Severity level
    pub severity: Severity,
    /// Issue code, e.g. `link-target-missing`
    pub code:     Option<String>,
    /// Human-readable message
    pub message:  String,
    /// Check that produced the diagnostic, prefixed with the tool name
    pub source:   String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        file: String,
        range: Range,
        severity: Severity,
        message: String,
        source: String,
    ) -> Self {
        Self {
            file,
            range,
            severity,
            code: None,
            message,
            source,
        }
    }

    /// Set error code
    pub fn with_code(mut self, code: String) -> Self {
        self.code = Some(code);
        self
    }

    /// Convert a check issue; issues always fail their check
    pub fn from_issue(check: CheckKind, issue: &CheckIssue) -> Self {
        let range = match issue.line {
            Some(line) => Range::entire_line_1_indexed(line as u32),
            None => Range::file_start(),
        };

        Self::new(
            issue.file.clone(),
            range,
            Severity::Error,
            issue.message.clone(),
            format!("{}::{}", DIAGNOSTIC_SOURCE, check),
        )
        .with_code(issue.kind.code().to_string())
    }
}

/// Summary statistics for a diagnostic collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    /// Total number of diagnostics
    pub total:                  usize,
    /// Number of errors
    pub errors:                 usize,
    /// Number of files with diagnostics
    pub files_with_diagnostics: usize,
    /// Duration of operation in milliseconds
    pub duration_ms:            u64,
}

impl DiagnosticSummary {
    /// Create summary from diagnostic collection
    pub fn from_diagnostics(diagnostics: &[Diagnostic], duration_ms: u64) -> Self {
        let mut errors = 0;
        let mut files = HashSet::new();

        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => errors += 1,
            }
            files.insert(&diagnostic.file);
        }

        Self {
            total: diagnostics.len(),
            errors,
            files_with_diagnostics: files.len(),
            duration_ms,
        }
    }

    /// Check if operation was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// Collection of diagnostics with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticCollection {
    /// Version of diagnostic format
    pub version:     String,
    /// Timestamp when diagnostics were generated
    pub timestamp:   String,
    /// Documentation root path
    pub root:        String,
    /// Command that generated these diagnostics
    pub command:     String,
    /// Individual diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Summary statistics
    pub summary:     DiagnosticSummary,
}

impl DiagnosticCollection {
    /// Create an empty collection
    pub fn new(root: &Path, command: impl Into<String>) -> Self {
        Self {
            version:     "1.0".to_string(),
            timestamp:   chrono::Utc::now().to_rfc3339(),
            root:        root.to_string_lossy().to_string(),
            command:     command.into(),
            diagnostics: Vec::new(),
            summary:     DiagnosticSummary::from_diagnostics(&[], 0),
        }
    }

    /// Collect one diagnostic per issue in a validation report
    pub fn from_report(report: &ValidationReport, command: impl Into<String>) -> Self {
        let mut collection = Self::new(Path::new(&report.root), command);
        collection.add_diagnostics(
            report
                .issues()
                .map(|(check, issue)| Diagnostic::from_issue(check, issue))
                .collect(),
        );
        collection.finalize(report.duration_ms)
    }

    /// Add multiple diagnostics
    pub fn add_diagnostics(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Finalize the collection with timing information
    pub fn finalize(mut self, duration_ms: u64) -> Self {
        self.summary = DiagnosticSummary::from_diagnostics(&self.diagnostics, duration_ms);
        self
    }

    /// Check if operation was successful
    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }
}
