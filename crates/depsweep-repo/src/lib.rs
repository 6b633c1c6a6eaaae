//! Repository adapters: discover packages, read and classify their manifests.
//!
//! This crate is allowed to do filesystem IO. It does not spawn processes; source
//! searching belongs to `depsweep-search`.

#![forbid(unsafe_code)]

mod discover;
mod error;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use depsweep_domain::model::{Manifest, PackageModel, WorkspaceModel};
use depsweep_types::Diagnostic;

pub use discover::{DiscoveredPackage, discover_packages};
pub use error::ManifestError;
pub use parse::{parse_manifest, read_manifest};

/// How packages are recognised on disk.
#[derive(Clone, Debug)]
pub struct DiscoveryOptions {
    /// Compared ignoring ASCII case.
    pub manifest_name: String,
    /// Globs of top-level directories that are never packages.
    pub exclude: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            manifest_name: "Cargo.toml".to_string(),
            exclude: Vec::new(),
        }
    }
}

/// The workspace model plus whatever went wrong per package while building it.
#[derive(Clone, Debug, Default)]
pub struct WorkspaceScan {
    pub model: WorkspaceModel,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the in-memory workspace model used by the checks.
///
/// Only discovery itself can fail; a package whose manifest cannot be read is kept
/// with empty dependency sets and a [`Diagnostic`].
pub fn build_workspace_model(
    repo_root: &Utf8Path,
    options: &DiscoveryOptions,
) -> anyhow::Result<WorkspaceScan> {
    let discovered = discover_packages(repo_root, &options.manifest_name, &options.exclude)
        .context("discover packages")?;
    Ok(read_packages(discovered))
}

/// Read every discovered package's manifest, degrading per package on error.
pub fn read_packages(discovered: Vec<DiscoveredPackage>) -> WorkspaceScan {
    let mut scan = WorkspaceScan::default();

    for DiscoveredPackage { id, manifest_path } in discovered {
        let manifest = match read_manifest(&manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(package = %id, error = %err, "continuing with no dependencies");
                scan.diagnostics.push(match err {
                    ManifestError::NotFound { path } => Diagnostic::ManifestNotFound {
                        package: id.clone(),
                        path,
                    },
                    ManifestError::Unreadable { path, source } => Diagnostic::ManifestUnreadable {
                        package: id.clone(),
                        path,
                        message: source.to_string(),
                    },
                });
                Manifest::default()
            }
        };
        scan.model.packages.push(PackageModel::new(id, manifest));
    }

    scan
}
