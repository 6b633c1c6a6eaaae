use camino::Utf8PathBuf;

/// Why a package's manifest could not be read. Never fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("manifest unreadable: {path}: {source}")]
    Unreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
