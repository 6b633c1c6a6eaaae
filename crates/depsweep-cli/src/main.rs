//! CLI entry point for depsweep.
//!
//! This module is thin: it handles argument parsing, logging setup, I/O, and exit codes.
//! All business logic lives in the `depsweep-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use depsweep_app::{CheckInput, render_text, run_check, serialize_report, verdict_exit_code};
use depsweep_settings::Overrides;
use std::io::Write;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "depsweep.toml";

#[derive(Parser, Debug)]
#[command(
    name = "depsweep",
    version,
    about = "Audit workspace dependency declarations against their source usage"
)]
struct Cli {
    /// Workspace root (directory containing the root manifest).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to depsweep config TOML, relative to the workspace root.
    /// Defaults to `depsweep.toml`; a missing default file means defaults apply.
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Override the usage search engine.
    #[arg(long, value_parser = ["ripgrep", "native"])]
    engine: Option<String>,

    /// Override the per-search timeout in milliseconds (0 = wait forever).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log debug details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("depsweep error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "depsweep=debug" } else { "depsweep=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    if !cli.repo_root.is_dir() {
        anyhow::bail!("repo root is not a directory: {}", cli.repo_root);
    }
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    let cfg_text = load_config(&repo_root, cli.config.as_deref())?;

    let input = CheckInput {
        repo_root: &repo_root,
        config_text: &cfg_text,
        overrides: Overrides {
            engine: cli.engine.clone(),
            timeout_ms: cli.timeout_ms,
        },
    };

    let output = run_check(input)?;

    let bytes = match cli.format {
        Format::Text => render_text(&output.report).into_bytes(),
        Format::Json => serialize_report(&output.report)?,
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes).context("write report to stdout")?;
    stdout.flush().context("flush stdout")?;

    Ok(verdict_exit_code(output.report.verdict))
}

/// The default config file may be absent; an explicitly named one may not.
fn load_config(repo_root: &Utf8Path, explicit: Option<&Utf8Path>) -> anyhow::Result<String> {
    let path = repo_root.join(explicit.unwrap_or(Utf8Path::new(DEFAULT_CONFIG)));
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            tracing::debug!(config = %path, "loaded config");
            Ok(text)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config {path}")),
    }
}
