//! gitbook-check core - integrity checks for GitBook documentation sets
//!
//! This library validates a GitBook documentation root: the `.gitbook.yaml`
//! configuration, the presence of required files and directories, the links
//! of the structural index (`SUMMARY.md`) and the basic shape of the root
//! document (`README.md`).
//!
//! # Architecture
//!
//! Everything is driven by a [`GitBookValidator`] bound to an explicit root
//! directory:
//!
//! - **Configuration**: typed `.gitbook.yaml` loading ([`config`])
//! - **Links**: markdown link extraction and resolution ([`links`])
//! - **Checks**: the five independent checks ([`validation`])
//! - **Reporting**: outcomes, aggregate verdict and LSP-style diagnostics
//!   ([`report`], [`diagnostics`])
//!
//! Checks never abort the run. A missing or malformed input fails the check
//! that needed it and the remaining checks still run.
//!
//! ```no_run
//! use gitbook_check_core::GitBookValidator;
//!
//! let report = GitBookValidator::with_defaults("docs").run_all();
//! assert!(report.passed);
//! ```

#![forbid(unsafe_code)]
// Lints configured in Cargo.toml

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod links;
pub mod report;
pub mod validation;

// Public API
pub use config::{
    CheckExpectations,
    GitBookConfig,
};
pub use error::{
    GitBookCheckError,
    GitBookResult,
};
pub use report::{
    CheckKind,
    CheckOutcome,
    ValidationReport,
};
pub use validation::{
    GitBookValidator,
    run_all_validations,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
