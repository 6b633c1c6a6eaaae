//! Usage oracles: decide whether a package's sources reference a crate.
//!
//! Both implementations are textual. A hit on any of `name::`, `use name` or
//! `extern crate name` counts as a use, which means comments and strings count too
//! and re-exported or macro-generated uses are missed.

#![forbid(unsafe_code)]

mod native;
mod ripgrep;

use camino::Utf8Path;
use depsweep_domain::oracle::UsageOracle;
use std::time::Duration;

pub use native::NativeOracle;
pub use ripgrep::RipgrepOracle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEngine {
    /// Spawn one `rg` process per search.
    Ripgrep,
    /// Walk and match files in-process.
    Native,
}

#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub engine: SearchEngine,
    /// Executable used by [`SearchEngine::Ripgrep`].
    pub program: String,
    /// Directory below each package that gets searched.
    pub source_dir: String,
    /// `None` waits for every search to finish.
    pub timeout: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Ripgrep,
            program: "rg".to_string(),
            source_dir: "src".to_string(),
            timeout: None,
        }
    }
}

/// Build the oracle selected by `options`.
///
/// Falls back to the native scanner when the ripgrep executable cannot be found.
pub fn build_oracle(repo_root: &Utf8Path, options: &SearchOptions) -> Box<dyn UsageOracle> {
    match options.engine {
        SearchEngine::Ripgrep => match which::which(&options.program) {
            Ok(program) => {
                tracing::debug!(program = %program.display(), "using ripgrep oracle");
                Box::new(
                    RipgrepOracle::new(program, repo_root, &options.source_dir)
                        .with_timeout(options.timeout),
                )
            }
            Err(err) => {
                tracing::warn!(
                    program = %options.program,
                    error = %err,
                    "ripgrep not found; falling back to the native scanner"
                );
                Box::new(NativeOracle::new(repo_root, &options.source_dir))
            }
        },
        SearchEngine::Native => Box::new(NativeOracle::new(repo_root, &options.source_dir)),
    }
}
