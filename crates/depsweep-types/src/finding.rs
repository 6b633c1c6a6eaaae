use crate::{PackageId, ids};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reportable anomaly produced by a check. Findings carry no remediation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// A workspace-wide declaration that no member package inherits.
    UnusedGlobal { dependency: String },

    /// Two distinct packages both declare `dependency` as package-specific.
    /// `first` precedes `second` in discovery order.
    Conflict {
        dependency: String,
        first: PackageId,
        second: PackageId,
    },

    /// A declared dependency with no plausible source reference in the package.
    UnusedInPackage {
        package: PackageId,
        dependency: String,
    },
}

impl Finding {
    pub fn check_id(&self) -> &'static str {
        match self {
            Finding::UnusedGlobal { .. } => ids::CHECK_GLOBALS_UNUSED,
            Finding::Conflict { .. } => ids::CHECK_DEPS_CONFLICT,
            Finding::UnusedInPackage { .. } => ids::CHECK_DEPS_UNUSED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Finding::UnusedGlobal { .. } => ids::CODE_UNUSED_GLOBAL,
            Finding::Conflict { .. } => ids::CODE_SPECIFIC_CONFLICT,
            Finding::UnusedInPackage { .. } => ids::CODE_UNUSED_IN_PACKAGE,
        }
    }

    pub fn dependency(&self) -> &str {
        match self {
            Finding::UnusedGlobal { dependency }
            | Finding::Conflict { dependency, .. }
            | Finding::UnusedInPackage { dependency, .. } => dependency,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UnusedGlobal { dependency } => {
                write!(f, "Unused global dependency: {dependency}")
            }
            Finding::Conflict {
                dependency,
                first,
                second,
            } => write!(f, "Conflict of {dependency} in {first}-{second}"),
            Finding::UnusedInPackage {
                package,
                dependency,
            } => write!(f, "Unused dep in {package}: {dependency}"),
        }
    }
}

/// A (package, dependency) pair whose usage could not be decided.
///
/// Kept apart from [`Finding::UnusedInPackage`]: an undetermined pair is never
/// reported as unused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UndeterminedUsage {
    /// The search operation failed or its worker terminated abnormally.
    NoInformation {
        package: PackageId,
        dependency: String,
        reason: String,
    },
    /// The search did not finish within the configured bound.
    TimedOut {
        package: PackageId,
        dependency: String,
        timeout_ms: u64,
    },
}

impl UndeterminedUsage {
    pub fn code(&self) -> &'static str {
        match self {
            UndeterminedUsage::NoInformation { .. } => ids::CODE_NO_INFORMATION,
            UndeterminedUsage::TimedOut { .. } => ids::CODE_SEARCH_TIMED_OUT,
        }
    }
}

impl fmt::Display for UndeterminedUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndeterminedUsage::NoInformation {
                package,
                dependency,
                reason,
            } => write!(
                f,
                "Didn't receive any information about the dependency {dependency} in {package} ({reason})"
            ),
            UndeterminedUsage::TimedOut {
                package,
                dependency,
                timeout_ms,
            } => write!(
                f,
                "Search for the dependency {dependency} in {package} timed out after {timeout_ms}ms"
            ),
        }
    }
}

/// Per-package IO problems encountered while building the workspace model.
///
/// The affected package continues with empty dependency sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    ManifestNotFound {
        package: PackageId,
        path: Utf8PathBuf,
    },
    ManifestUnreadable {
        package: PackageId,
        path: Utf8PathBuf,
        message: String,
    },
}

impl Diagnostic {
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::ManifestNotFound { .. } => ids::CODE_MANIFEST_NOT_FOUND,
            Diagnostic::ManifestUnreadable { .. } => ids::CODE_MANIFEST_UNREADABLE,
        }
    }

    pub fn package(&self) -> &PackageId {
        match self {
            Diagnostic::ManifestNotFound { package, .. }
            | Diagnostic::ManifestUnreadable { package, .. } => package,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ManifestNotFound { package, path } => {
                write!(f, "No manifest found for {package} at {path}")
            }
            Diagnostic::ManifestUnreadable {
                package,
                path,
                message,
            } => write!(f, "Could not read manifest of {package} at {path}: {message}"),
        }
    }
}
