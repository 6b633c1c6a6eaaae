//! Line-oriented manifest reader.
//!
//! Only dependency names are extracted. Every `[...dependencies]` section counts
//! (`[dependencies]`, `[dev-dependencies]`, `[workspace.dependencies]`,
//! `[target.'cfg(unix)'.dependencies]`, ...); any other header leaves it.

use crate::error::ManifestError;
use camino::Utf8Path;
use depsweep_domain::model::Manifest;

/// Inheritance flag as it reads once whitespace is gone.
const INHERIT_MARKER: &str = "workspace=true";

pub fn parse_manifest(text: &str) -> Manifest {
    let mut manifest = Manifest::default();
    let mut in_dependencies = false;

    for raw in text.lines() {
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_dependencies = line.ends_with("dependencies]");
            continue;
        }

        if !in_dependencies {
            continue;
        }

        // Continuation lines of multi-line arrays have no name of their own.
        let Some(name) = dependency_name(&line) else {
            continue;
        };

        if is_inherited(&line) {
            manifest.global.push(name.to_string());
        } else {
            manifest.specific.push(name.to_string());
        }
    }

    manifest
}

pub fn read_manifest(path: &Utf8Path) -> Result<Manifest, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ManifestError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ManifestError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(parse_manifest(&text))
}

/// Bare name before the first `.` or `=`: `name = "1"` and `name.version = "1"`.
fn dependency_name(line: &str) -> Option<&str> {
    let end = line.find(['.', '=']).unwrap_or(line.len());
    let name = &line[..end];
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(name)
}

/// `name.workspace = true` or `name = { workspace = true, ... }`.
fn is_inherited(line: &str) -> bool {
    line.match_indices(INHERIT_MARKER).any(|(at, _)| {
        matches!(line[..at].chars().next_back(), Some('.' | '{' | ','))
    })
}
