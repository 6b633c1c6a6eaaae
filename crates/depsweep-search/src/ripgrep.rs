use camino::{Utf8Path, Utf8PathBuf};
use depsweep_domain::oracle::{SearchError, SearchOutcome, UsageOracle, UsageQuery};
use depsweep_types::PackageId;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs `rg --quiet -e <pattern> <package>/<source_dir>` once per query.
///
/// Exit status 0 means a match, 1 means none. Anything else, including death by
/// signal, is an error the verifier reports as "no information".
#[derive(Clone, Debug)]
pub struct RipgrepOracle {
    program: PathBuf,
    repo_root: Utf8PathBuf,
    source_dir: String,
    timeout: Option<Duration>,
}

impl RipgrepOracle {
    pub fn new(program: impl Into<PathBuf>, repo_root: &Utf8Path, source_dir: &str) -> Self {
        Self {
            program: program.into(),
            repo_root: repo_root.to_path_buf(),
            source_dir: source_dir.to_string(),
            timeout: None,
        }
    }

    /// Kill searches that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// `None` when the deadline passed and the child was killed.
    fn wait(&self, child: &mut Child) -> std::io::Result<Option<ExitStatus>> {
        let Some(limit) = self.timeout else {
            return child.wait().map(Some);
        };

        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                // The child may have exited between the poll and the kill.
                let _ = child.kill();
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl UsageOracle for RipgrepOracle {
    fn find_usage(
        &self,
        package: &PackageId,
        query: &UsageQuery,
    ) -> Result<SearchOutcome, SearchError> {
        let dir = package.dir_in(&self.repo_root).join(&self.source_dir);
        if !dir.is_dir() {
            tracing::debug!(package = %package, dir = %dir, "no source directory");
            return Ok(SearchOutcome::NotFound);
        }

        let mut child = Command::new(&self.program)
            .arg("--quiet")
            .arg("--no-config")
            .arg("--regexp")
            .arg(query.pattern())
            .arg("--")
            .arg(dir.as_std_path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SearchError::Spawn {
                program: self.program_name(),
                source,
            })?;

        // Drained alongside the wait: a child blocked on a full stderr pipe never exits.
        let stderr_pipe = child.stderr.take();
        let (status, stderr) = thread::scope(|scope| {
            let reader = scope.spawn(move || {
                let mut buf = Vec::new();
                if let Some(mut pipe) = stderr_pipe {
                    let _ = pipe.read_to_end(&mut buf);
                }
                String::from_utf8_lossy(&buf).into_owned()
            });
            let status = self.wait(&mut child);
            (status, reader.join().unwrap_or_default())
        });

        let status = status.map_err(|source| SearchError::Io {
            path: dir.to_string(),
            source,
        })?;
        let Some(status) = status else {
            tracing::debug!(package = %package, dependency = %query.dependency, "search killed at deadline");
            return Ok(SearchOutcome::TimedOut(self.timeout.unwrap_or_default()));
        };

        match status.code() {
            Some(0) => Ok(SearchOutcome::Found),
            Some(1) => Ok(SearchOutcome::NotFound),
            Some(code) => Err(SearchError::Failed {
                program: self.program_name(),
                code,
                stderr: stderr.trim().to_string(),
            }),
            None => Err(SearchError::Terminated {
                program: self.program_name(),
            }),
        }
    }
}
