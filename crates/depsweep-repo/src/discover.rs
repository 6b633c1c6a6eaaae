use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use depsweep_types::PackageId;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredPackage {
    pub id: PackageId,
    /// The manifest file as it is actually spelled on disk.
    pub manifest_path: Utf8PathBuf,
}

/// Discover the packages of the workspace rooted at `repo_root`.
///
/// Behavior:
/// - Candidates are the immediate subdirectories of `repo_root`, in file-name order,
///   followed by `repo_root` itself (the root package, `.`).
/// - A candidate is a package iff it directly contains a file whose name equals
///   `manifest_name` ignoring ASCII case.
/// - Subdirectories matching an `exclude` glob are never packages.
pub fn discover_packages(
    repo_root: &Utf8Path,
    manifest_name: &str,
    exclude: &[String],
) -> anyhow::Result<Vec<DiscoveredPackage>> {
    let exclude_set = build_globset(exclude).context("compile exclude globset")?;

    let mut out = Vec::new();

    for entry in WalkDir::new(repo_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        // Follows symlinks, unlike `entry.file_type()`.
        if !entry.path().is_dir() {
            continue;
        }
        let Some(dir) = pathbuf_to_utf8(entry.into_path()) else {
            tracing::warn!("skipping directory with a non UTF-8 name");
            continue;
        };

        let rel = dir
            .strip_prefix(repo_root)
            .unwrap_or(&dir)
            .as_str()
            .replace('\\', "/");
        if exclude_set.is_match(&rel) {
            tracing::debug!(dir = %rel, "excluded from discovery");
            continue;
        }

        match find_manifest(&dir, manifest_name) {
            Ok(Some(manifest_path)) => out.push(DiscoveredPackage {
                id: PackageId::new(&rel),
                manifest_path,
            }),
            Ok(None) => {}
            Err(err) => tracing::warn!(dir = %rel, error = %err, "cannot list directory"),
        }
    }

    if let Some(manifest_path) =
        find_manifest(repo_root, manifest_name).with_context(|| format!("list {repo_root}"))?
    {
        out.push(DiscoveredPackage {
            id: PackageId::root(),
            manifest_path,
        });
    }

    tracing::debug!(packages = out.len(), "discovered packages");
    Ok(out)
}

/// The first file in `dir` (by name) matching `manifest_name` case-insensitively.
fn find_manifest(dir: &Utf8Path, manifest_name: &str) -> std::io::Result<Option<Utf8PathBuf>> {
    let mut candidates: Vec<Utf8PathBuf> = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_name().eq_ignore_ascii_case(manifest_name) && entry.path().is_file() {
            candidates.push(entry.into_path());
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
