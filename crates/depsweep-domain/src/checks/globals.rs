use crate::checks::utils::{build_allowlist, is_allowed};
use crate::checks::{CheckOutcome, policy_or_skip};
use crate::model::WorkspaceModel;
use crate::policy::EffectiveConfig;
use depsweep_types::{Finding, ids};
use std::collections::BTreeMap;

/// Minimum number of inheriting declarations a workspace dependency needs.
pub const GLOBAL_USAGE_THRESHOLD: usize = 1;

/// Report every workspace-wide declaration inherited fewer than
/// [`GLOBAL_USAGE_THRESHOLD`] times across member packages.
///
/// Names are visited in root declaration order; a name declared twice at the
/// root is visited twice.
pub fn check_globals(model: &WorkspaceModel) -> Vec<Finding> {
    let mut inherited: BTreeMap<&str, usize> = BTreeMap::new();
    for member in model.members() {
        for name in &member.manifest.global {
            *inherited.entry(name.as_str()).or_default() += 1;
        }
    }

    model
        .global_declarations()
        .iter()
        .filter(|name| {
            inherited.get(name.as_str()).copied().unwrap_or(0) < GLOBAL_USAGE_THRESHOLD
        })
        .map(|name| Finding::UnusedGlobal {
            dependency: name.clone(),
        })
        .collect()
}

pub fn run(model: &WorkspaceModel, cfg: &EffectiveConfig) -> CheckOutcome {
    let policy = match policy_or_skip(cfg, ids::CHECK_GLOBALS_UNUSED) {
        Ok(policy) => policy,
        Err(skipped) => return skipped,
    };
    let allow = build_allowlist(&policy.allow);

    let findings = check_globals(model)
        .into_iter()
        .filter(|f| !is_allowed(allow.as_ref(), f.dependency()))
        .collect();

    CheckOutcome::from_findings(ids::CHECK_GLOBALS_UNUSED, findings, Vec::new())
}
