//! The seam between the usage verifier and whatever decides "is this name referenced".
//!
//! The verifier only knows about [`UsageOracle`]; the textual ripgrep/native scanners
//! live in `depsweep-search` and a semantic implementation could replace them.

use depsweep_types::PackageId;
use std::time::Duration;

/// What to look for when verifying one dependency of one package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageQuery {
    /// The declared name, as written in the manifest.
    pub dependency: String,
    /// The name as it appears in Rust source: hyphens become underscores.
    pub crate_name: String,
}

impl UsageQuery {
    pub fn new(dependency: &str) -> Self {
        Self {
            dependency: dependency.to_string(),
            crate_name: dependency.replace('-', "_"),
        }
    }

    /// Literal forms that count as a reference to the crate.
    pub fn needles(&self) -> [String; 3] {
        let name = &self.crate_name;
        [
            format!("{name}::"),
            format!("use {name}"),
            format!("extern crate {name}"),
        ]
    }

    /// The needles joined as a regex alternation.
    ///
    /// Names are `[A-Za-z0-9_]+` after normalization, so no escaping is needed.
    pub fn pattern(&self) -> String {
        self.needles().join("|")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found,
    NotFound,
    TimedOut(Duration),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` was terminated before reporting a result")]
    Terminated { program: String },

    #[error("`{program}` exited with status {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("invalid search pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    #[error("io error while searching {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Decides whether a package's sources reference a dependency.
///
/// Implementations are called concurrently from many workers and must not rely
/// on call ordering.
pub trait UsageOracle: Send + Sync {
    fn find_usage(
        &self,
        package: &PackageId,
        query: &UsageQuery,
    ) -> Result<SearchOutcome, SearchError>;
}

impl<T: UsageOracle + ?Sized> UsageOracle for &T {
    fn find_usage(
        &self,
        package: &PackageId,
        query: &UsageQuery,
    ) -> Result<SearchOutcome, SearchError> {
        (**self).find_usage(package, query)
    }
}

impl<T: UsageOracle + ?Sized> UsageOracle for Box<T> {
    fn find_usage(
        &self,
        package: &PackageId,
        query: &UsageQuery,
    ) -> Result<SearchOutcome, SearchError> {
        (**self).find_usage(package, query)
    }
}
