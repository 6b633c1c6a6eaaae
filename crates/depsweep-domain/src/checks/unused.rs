//! Usage verifier: one search per (package, dependency) pair, all in flight at once.
//!
//! Every pair gets its own scoped worker and its own join handle; the handle is
//! the pair's result slot, so no two workers ever share mutable state. The
//! verifier blocks until every handle has been joined before aggregating.

use crate::checks::utils::{build_allowlist, is_allowed};
use crate::checks::{CheckOutcome, policy_or_skip};
use crate::model::WorkspaceModel;
use crate::oracle::{SearchOutcome, UsageOracle, UsageQuery};
use crate::policy::EffectiveConfig;
use depsweep_types::{Finding, PackageId, UndeterminedUsage, ids};
use std::any::Any;
use std::thread;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageStatus {
    Used,
    Unused,
    TimedOut(Duration),
    /// The search failed or its worker died; carries the reason.
    NoInformation(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageRecord {
    pub package: PackageId,
    pub dependency: String,
    pub status: UsageStatus,
}

/// Per-pair results in (package discovery, declaration) order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageReport {
    pub records: Vec<UsageRecord>,
}

impl UsageReport {
    pub fn findings(&self) -> Vec<Finding> {
        self.records
            .iter()
            .filter(|r| r.status == UsageStatus::Unused)
            .map(|r| Finding::UnusedInPackage {
                package: r.package.clone(),
                dependency: r.dependency.clone(),
            })
            .collect()
    }

    pub fn undetermined(&self) -> Vec<UndeterminedUsage> {
        self.records
            .iter()
            .filter_map(|r| match &r.status {
                UsageStatus::Used | UsageStatus::Unused => None,
                UsageStatus::TimedOut(limit) => Some(UndeterminedUsage::TimedOut {
                    package: r.package.clone(),
                    dependency: r.dependency.clone(),
                    timeout_ms: limit.as_millis() as u64,
                }),
                UsageStatus::NoInformation(reason) => Some(UndeterminedUsage::NoInformation {
                    package: r.package.clone(),
                    dependency: r.dependency.clone(),
                    reason: reason.clone(),
                }),
            })
            .collect()
    }

    #[cfg(test)]
    pub fn status_of(&self, package: &str, dependency: &str) -> Option<&UsageStatus> {
        self.records
            .iter()
            .find(|r| r.package.as_str() == package && r.dependency == dependency)
            .map(|r| &r.status)
    }
}

/// Verify every dependency of every member package against `oracle`.
///
/// Each package's declarations are deduplicated before searching; the root
/// package is never verified.
pub fn verify_usage(model: &WorkspaceModel, oracle: &dyn UsageOracle) -> UsageReport {
    verify_usage_filtered(model, oracle, |_| true)
}

fn verify_usage_filtered(
    model: &WorkspaceModel,
    oracle: &dyn UsageOracle,
    keep: impl Fn(&str) -> bool,
) -> UsageReport {
    let keep = &keep;
    let pairs: Vec<(&PackageId, UsageQuery)> = model
        .members()
        .flat_map(move |package| {
            package
                .manifest
                .declared_once()
                .into_iter()
                .filter(move |name| keep(*name))
                .map(move |name| (&package.id, UsageQuery::new(name)))
        })
        .collect();

    tracing::debug!(pairs = pairs.len(), "dispatching usage searches");

    let records: Vec<UsageRecord> = thread::scope(|scope| {
        // Issue every search before waiting on any of them.
        let handles: Vec<_> = pairs
            .iter()
            .map(|(package, query)| {
                thread::Builder::new()
                    .name(format!("depsweep-search-{}", query.crate_name))
                    .spawn_scoped(scope, move || oracle.find_usage(package, query))
            })
            .collect();

        pairs
            .iter()
            .zip(handles)
            .map(|((package, query), handle)| {
                let status = match handle {
                    Err(err) => {
                        UsageStatus::NoInformation(format!("could not start worker: {err}"))
                    }
                    Ok(handle) => match handle.join() {
                        Ok(Ok(SearchOutcome::Found)) => UsageStatus::Used,
                        Ok(Ok(SearchOutcome::NotFound)) => UsageStatus::Unused,
                        Ok(Ok(SearchOutcome::TimedOut(limit))) => UsageStatus::TimedOut(limit),
                        Ok(Err(err)) => UsageStatus::NoInformation(err.to_string()),
                        Err(payload) => UsageStatus::NoInformation(format!(
                            "search worker panicked: {}",
                            panic_message(&*payload)
                        )),
                    },
                };
                if let UsageStatus::NoInformation(reason) = &status {
                    tracing::warn!(
                        package = %package,
                        dependency = %query.dependency,
                        %reason,
                        "no usage information received"
                    );
                }
                UsageRecord {
                    package: (*package).clone(),
                    dependency: query.dependency.clone(),
                    status,
                }
            })
            .collect()
    });

    UsageReport { records }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

pub fn run(
    model: &WorkspaceModel,
    oracle: &dyn UsageOracle,
    cfg: &EffectiveConfig,
) -> CheckOutcome {
    let policy = match policy_or_skip(cfg, ids::CHECK_DEPS_UNUSED) {
        Ok(policy) => policy,
        Err(skipped) => return skipped,
    };
    let allow = build_allowlist(&policy.allow);

    // Allowlisted names are never searched.
    let report =
        verify_usage_filtered(model, oracle, |name| !is_allowed(allow.as_ref(), name));

    CheckOutcome::from_findings(
        ids::CHECK_DEPS_UNUSED,
        report.findings(),
        report.undetermined(),
    )
}
