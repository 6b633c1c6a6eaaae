use crate::checks::utils::{build_allowlist, is_allowed};
use crate::checks::{CheckOutcome, policy_or_skip};
use crate::model::WorkspaceModel;
use crate::policy::EffectiveConfig;
use depsweep_types::{Finding, ids};

/// Report every dependency declared as specific by two distinct packages.
///
/// Pairs are visited once, `first` before `second` in discovery order, and the
/// root package takes part like any member. One finding per shared name.
pub fn find_conflicts(model: &WorkspaceModel) -> Vec<Finding> {
    let mut out = Vec::new();

    for (i, first) in model.packages.iter().enumerate() {
        for second in &model.packages[i + 1..] {
            // Two entries for the same directory are one package.
            if first.id == second.id {
                continue;
            }
            for name in &first.manifest.specific {
                if second.manifest.specific.contains(name) {
                    out.push(Finding::Conflict {
                        dependency: name.clone(),
                        first: first.id.clone(),
                        second: second.id.clone(),
                    });
                }
            }
        }
    }

    out
}

pub fn run(model: &WorkspaceModel, cfg: &EffectiveConfig) -> CheckOutcome {
    let policy = match policy_or_skip(cfg, ids::CHECK_DEPS_CONFLICT) {
        Ok(policy) => policy,
        Err(skipped) => return skipped,
    };
    let allow = build_allowlist(&policy.allow);

    let findings = find_conflicts(model)
        .into_iter()
        .filter(|f| !is_allowed(allow.as_ref(), f.dependency()))
        .collect();

    CheckOutcome::from_findings(ids::CHECK_DEPS_CONFLICT, findings, Vec::new())
}
