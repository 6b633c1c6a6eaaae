use camino::{Utf8Path, Utf8PathBuf};
use depsweep_domain::oracle::{SearchError, SearchOutcome, UsageOracle, UsageQuery};
use depsweep_types::PackageId;
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

/// In-process scanner: walks the package's source directory and matches every
/// regular file against the query pattern.
///
/// Hidden files and directories are skipped, as ripgrep does by default.
#[derive(Clone, Debug)]
pub struct NativeOracle {
    repo_root: Utf8PathBuf,
    source_dir: String,
}

impl NativeOracle {
    pub fn new(repo_root: &Utf8Path, source_dir: &str) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            source_dir: source_dir.to_string(),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

impl UsageOracle for NativeOracle {
    fn find_usage(
        &self,
        package: &PackageId,
        query: &UsageQuery,
    ) -> Result<SearchOutcome, SearchError> {
        let pattern = query.pattern();
        let regex = Regex::new(&pattern).map_err(|err| SearchError::Pattern {
            pattern: pattern.clone(),
            message: err.to_string(),
        })?;

        let dir = package.dir_in(&self.repo_root).join(&self.source_dir);
        if !dir.is_dir() {
            tracing::debug!(package = %package, dir = %dir, "no source directory");
            return Ok(SearchOutcome::NotFound);
        }

        for entry in WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = entry.map_err(|err| SearchError::Io {
                path: dir.to_string(),
                source: err.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let bytes = std::fs::read(entry.path()).map_err(|source| SearchError::Io {
                path: entry.path().display().to_string(),
                source,
            })?;
            if regex.is_match(&String::from_utf8_lossy(&bytes)) {
                return Ok(SearchOutcome::Found);
            }
        }

        Ok(SearchOutcome::NotFound)
    }
}
