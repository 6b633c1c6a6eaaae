use crate::model::DepsweepConfigV1;
use anyhow::Context;
use depsweep_domain::policy::{EffectiveConfig, FailOn};
use depsweep_repo::DiscoveryOptions;
use depsweep_search::{SearchEngine, SearchOptions};
use depsweep_types::ids;
use globset::Glob;
use std::time::Duration;

/// Values given on the command line; they win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub engine: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub discovery: DiscoveryOptions,
    pub search: SearchOptions,
}

pub fn resolve_config(
    cfg: DepsweepConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    for (check_id, cc) in cfg.checks.iter() {
        let Some(entry) = effective.checks.get_mut(check_id) else {
            anyhow::bail!(
                "unknown check id: {check_id} (expected one of {})",
                ids::ALL_CHECKS.join(", ")
            );
        };
        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if !cc.allow.is_empty() {
            validate_globs(&format!("allow glob for {check_id}"), &cc.allow)?;
            entry.allow = cc.allow.clone();
        }
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    let mut discovery = DiscoveryOptions::default();
    if let Some(name) = cfg.manifest_name {
        if name.trim().is_empty() {
            anyhow::bail!("manifest_name must not be empty");
        }
        discovery.manifest_name = name;
    }
    validate_globs("exclude glob", &cfg.exclude)?;
    discovery.exclude = cfg.exclude;

    let mut search = SearchOptions::default();
    if let Some(dir) = cfg.source_dir {
        search.source_dir = dir;
    }
    if let Some(program) = cfg.search.program {
        search.program = program;
    }
    if let Some(engine) = overrides.engine.or(cfg.search.engine) {
        search.engine = parse_engine(&engine)?;
    }
    search.timeout = match overrides.timeout_ms.or(cfg.search.timeout_ms) {
        None | Some(0) => None,
        Some(ms) => Some(Duration::from_millis(ms)),
    };

    Ok(ResolvedConfig {
        effective,
        discovery,
        search,
    })
}

fn validate_globs(what: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid {what}: {pattern}"))?;
    }
    Ok(())
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "findings" => Ok(FailOn::Findings),
        "never" => Ok(FailOn::Never),
        other => anyhow::bail!("unknown fail_on: {other} (expected findings|never)"),
    }
}

fn parse_engine(v: &str) -> anyhow::Result<SearchEngine> {
    match v {
        "ripgrep" | "rg" => Ok(SearchEngine::Ripgrep),
        "native" => Ok(SearchEngine::Native),
        other => anyhow::bail!("unknown search engine: {other} (expected ripgrep|native)"),
    }
}
