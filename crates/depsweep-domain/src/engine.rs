use crate::checks;
use crate::model::WorkspaceModel;
use crate::oracle::UsageOracle;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::DomainReport;
use depsweep_types::Verdict;

pub fn evaluate(
    model: &WorkspaceModel,
    oracle: &dyn UsageOracle,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let checks = checks::run_all(model, oracle, cfg);

    let findings: usize = checks.iter().map(|c| c.findings.len()).sum();
    let undetermined: usize = checks.iter().map(|c| c.undetermined.len()).sum();

    DomainReport {
        verdict: compute_verdict(findings, undetermined, cfg.fail_on),
        checks,
        packages_scanned: model.packages.len() as u32,
        dependencies_scanned: model.dependencies_scanned() as u32,
    }
}

/// `unresolved` counts everything that kept the run from a full answer:
/// undetermined usages and per-package manifest problems.
pub fn compute_verdict(findings: usize, unresolved: usize, fail_on: FailOn) -> Verdict {
    if findings > 0 {
        return match fail_on {
            FailOn::Findings => Verdict::Fail,
            FailOn::Never => Verdict::Warn,
        };
    }
    if unresolved > 0 {
        return Verdict::Warn;
    }
    Verdict::Pass
}
