use crate::model::{Manifest, PackageModel, WorkspaceModel};
use crate::oracle::{SearchError, SearchOutcome, UsageOracle, UsageQuery};
use crate::policy::{CheckPolicy, EffectiveConfig};
use depsweep_types::PackageId;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn manifest(specific: &[&str], global: &[&str]) -> Manifest {
    Manifest {
        specific: specific.iter().map(|s| s.to_string()).collect(),
        global: global.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn package(id: &str, manifest: Manifest) -> PackageModel {
    PackageModel::new(PackageId::new(id), manifest)
}

pub fn model(packages: Vec<PackageModel>) -> WorkspaceModel {
    WorkspaceModel::new(packages)
}

pub fn config_with_allow(check_id: &str, allow: Vec<&str>) -> EffectiveConfig {
    let mut cfg = EffectiveConfig::default();
    let mut policy = CheckPolicy::enabled();
    policy.allow = allow.into_iter().map(|s| s.to_string()).collect();
    cfg.checks.insert(check_id.to_string(), policy);
    cfg
}

pub fn config_without(check_id: &str) -> EffectiveConfig {
    let mut cfg = EffectiveConfig::default();
    cfg.checks.insert(check_id.to_string(), CheckPolicy::disabled());
    cfg
}

#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    Fail,
    Panic,
    Timeout,
}

/// Oracle backed by a fixed table of (package, crate_name) pairs that count as used.
#[derive(Default)]
pub struct StaticOracle {
    used: BTreeSet<(String, String)>,
    special: Vec<((String, String), Behavior)>,
    pub calls: AtomicUsize,
}

impl StaticOracle {
    pub fn used(pairs: &[(&str, &str)]) -> Self {
        Self {
            used: pairs
                .iter()
                .map(|(p, d)| (p.to_string(), d.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with(mut self, package: &str, crate_name: &str, behavior: Behavior) -> Self {
        self.special
            .push(((package.to_string(), crate_name.to_string()), behavior));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UsageOracle for StaticOracle {
    fn find_usage(
        &self,
        package: &PackageId,
        query: &UsageQuery,
    ) -> Result<SearchOutcome, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (package.as_str().to_string(), query.crate_name.clone());

        if let Some((_, behavior)) = self.special.iter().find(|(k, _)| *k == key) {
            return match behavior {
                Behavior::Fail => Err(SearchError::Terminated {
                    program: "static".to_string(),
                }),
                Behavior::Panic => panic!("search crashed for {}", query.crate_name),
                Behavior::Timeout => Ok(SearchOutcome::TimedOut(Duration::from_millis(5))),
            };
        }

        if self.used.contains(&key) {
            Ok(SearchOutcome::Found)
        } else {
            Ok(SearchOutcome::NotFound)
        }
    }
}
