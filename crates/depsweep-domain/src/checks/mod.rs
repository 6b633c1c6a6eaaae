use crate::model::WorkspaceModel;
use crate::oracle::UsageOracle;
use crate::policy::EffectiveConfig;
use depsweep_types::{CheckStatus, CheckSummary, Finding, UndeterminedUsage};

pub mod conflicts;
pub mod globals;
pub mod unused;
mod utils;


pub use conflicts::find_conflicts;
pub use globals::{GLOBAL_USAGE_THRESHOLD, check_globals};
pub use unused::{UsageRecord, UsageReport, UsageStatus, verify_usage};

/// Result of running one check under its policy.
#[derive(Clone, Debug)]
pub struct CheckOutcome {
    pub check_id: &'static str,
    pub status: CheckStatus,
    pub findings: Vec<Finding>,
    pub undetermined: Vec<UndeterminedUsage>,
}

impl CheckOutcome {
    fn skipped(check_id: &'static str) -> Self {
        Self {
            check_id,
            status: CheckStatus::Skipped,
            findings: Vec::new(),
            undetermined: Vec::new(),
        }
    }

    fn from_findings(
        check_id: &'static str,
        findings: Vec<Finding>,
        undetermined: Vec<UndeterminedUsage>,
    ) -> Self {
        let status = if findings.is_empty() {
            CheckStatus::Clean
        } else {
            CheckStatus::Findings
        };
        Self {
            check_id,
            status,
            findings,
            undetermined,
        }
    }

    #[cfg(test)]
    pub fn is_clean(&self) -> bool {
        self.status == CheckStatus::Clean
    }

    pub fn summary(&self) -> CheckSummary {
        CheckSummary {
            check_id: self.check_id.to_string(),
            status: self.status,
            findings: self.findings.len() as u32,
        }
    }
}

/// Run every check in order: the two cheap model-only checks, then the usage verifier.
pub fn run_all(
    model: &WorkspaceModel,
    oracle: &dyn UsageOracle,
    cfg: &EffectiveConfig,
) -> Vec<CheckOutcome> {
    vec![
        globals::run(model, cfg),
        conflicts::run(model, cfg),
        unused::run(model, oracle, cfg),
    ]
}

pub(crate) fn policy_or_skip<'a>(
    cfg: &'a EffectiveConfig,
    check_id: &'static str,
) -> Result<&'a crate::policy::CheckPolicy, CheckOutcome> {
    cfg.check_policy(check_id)
        .ok_or_else(|| CheckOutcome::skipped(check_id))
}
