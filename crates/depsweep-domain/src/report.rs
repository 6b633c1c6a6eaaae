use crate::checks::CheckOutcome;
use depsweep_types::{CheckSummary, Finding, UndeterminedUsage, Verdict};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    /// One outcome per check, in execution order.
    pub checks: Vec<CheckOutcome>,
    pub packages_scanned: u32,
    pub dependencies_scanned: u32,
}

impl DomainReport {
    pub fn check(&self, check_id: &str) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check_id == check_id)
    }

    pub fn findings(&self) -> Vec<Finding> {
        self.checks
            .iter()
            .flat_map(|c| c.findings.iter().cloned())
            .collect()
    }

    pub fn undetermined(&self) -> Vec<UndeterminedUsage> {
        self.checks
            .iter()
            .flat_map(|c| c.undetermined.iter().cloned())
            .collect()
    }

    pub fn summaries(&self) -> Vec<CheckSummary> {
        self.checks.iter().map(CheckOutcome::summary).collect()
    }
}
