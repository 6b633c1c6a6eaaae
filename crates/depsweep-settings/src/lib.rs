//! Config parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CheckConfig, DepsweepConfigV1, SearchConfig};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `depsweep.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DepsweepConfigV1> {
    let cfg: DepsweepConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config: defaults, then the file, then CLI overrides.
pub fn resolve_config(
    cfg: DepsweepConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
