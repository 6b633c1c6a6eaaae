use crate::{Diagnostic, Finding, PackageId, UndeterminedUsage};
use serde::{Deserialize, Serialize};

/// Stable schema identifier for depsweep reports.
pub const SCHEMA_REPORT_V1: &str = "depsweep.report.v1";

/// Verdict is intentionally small: it maps cleanly to exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Clean,
    Findings,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub check_id: String,
    pub status: CheckStatus,
    pub findings: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub id: PackageId,
    pub specific: Vec<String>,
    pub global: Vec<String>,
}

/// The envelope written by `--format json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub schema: String,
    pub tool: ToolMeta,
    pub verdict: Verdict,
    pub packages: Vec<PackageEntry>,
    pub checks: Vec<CheckSummary>,
    pub findings: Vec<Finding>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub undetermined: Vec<UndeterminedUsage>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn check(&self, check_id: &str) -> Option<&CheckSummary> {
        self.checks.iter().find(|c| c.check_id == check_id)
    }
}
