use depsweep_types::ids;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    /// Any finding fails the run.
    Findings,
    /// Findings are reported but never fail the run.
    Never,
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    /// Dependency-name globs this check never reports.
    pub allow: Vec<String>,
}

impl CheckPolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            allow: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            allow: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub fail_on: FailOn,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        let checks = ids::ALL_CHECKS
            .iter()
            .map(|id| (id.to_string(), CheckPolicy::enabled()))
            .collect();
        Self {
            fail_on: FailOn::Findings,
            checks,
        }
    }
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
