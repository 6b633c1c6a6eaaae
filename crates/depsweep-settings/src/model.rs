use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `depsweep.toml` schema v1.
///
/// Every key is optional; an empty file resolves to the defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DepsweepConfigV1 {
    /// File name that qualifies a directory as a package, compared ignoring case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_name: Option<String>,

    /// Directory searched below each package by the usage verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,

    /// Globs of top-level directories that are never packages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// `findings` (default) or `never`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    #[serde(default)]
    pub search: SearchConfig,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// `ripgrep` (default) or `native`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Ripgrep executable, looked up on `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Per-search limit; `0` waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Dependency-name globs this check never reports.
    #[serde(default)]
    pub allow: Vec<String>,
}
