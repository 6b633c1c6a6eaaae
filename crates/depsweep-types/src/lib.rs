//! Stable DTOs and IDs used across the depsweep workspace.
//!
//! This crate is intentionally boring:
//! - package identities
//! - findings and diagnostics produced by a run
//! - stable string IDs and codes
//! - the JSON report envelope

#![forbid(unsafe_code)]

pub mod finding;
pub mod ids;
pub mod package;
pub mod receipt;

pub use finding::{Diagnostic, Finding, UndeterminedUsage};
pub use package::PackageId;
pub use receipt::{
    CheckStatus, CheckSummary, PackageEntry, Report, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
