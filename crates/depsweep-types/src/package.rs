use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a workspace package: its directory relative to the workspace root.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./` and no trailing `/`
/// - the workspace root itself is the sentinel `.`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl Default for PackageId {
    fn default() -> Self {
        PackageId::root()
    }
}

impl PackageId {
    pub const ROOT: &'static str = ".";

    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        while v.len() > 1 && v.ends_with('/') {
            v.pop();
        }
        if v.is_empty() {
            v = Self::ROOT.to_string();
        }
        Self(v)
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory of this package below `workspace_root`.
    pub fn dir_in(&self, workspace_root: &Utf8Path) -> Utf8PathBuf {
        if self.is_root() {
            workspace_root.to_path_buf()
        } else {
            workspace_root.join(&self.0)
        }
    }
}

/// Human-facing name: the root package prints as `root`.
impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            f.write_str(&self.0)
        }
    }
}
