//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - conflict pairs (never self-pairs, never reported in both orders)
//! - global usage counting (one inheriting package is enough)
//! - verifier determinism under a fixed oracle

use crate::checks::{check_globals, find_conflicts, verify_usage};
use crate::model::{Manifest, PackageModel, WorkspaceModel};
use crate::test_support::StaticOracle;
use depsweep_types::{Finding, PackageId};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Dependency names from a small alphabet so that collisions actually happen.
fn arb_dep_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("serde".to_string()),
        Just("tokio".to_string()),
        Just("rand".to_string()),
        Just("log".to_string()),
        Just("serde-json".to_string()),
        prop::string::string_regex("[a-z][a-z0-9_-]{0,7}").unwrap(),
    ]
}

fn arb_manifest() -> impl Strategy<Value = Manifest> {
    (
        prop::collection::vec(arb_dep_name(), 0..6),
        prop::collection::vec(arb_dep_name(), 0..6),
    )
        .prop_map(|(specific, global)| Manifest { specific, global })
}

/// A workspace with unique member directories plus a root package.
fn arb_workspace() -> impl Strategy<Value = WorkspaceModel> {
    (
        prop::collection::btree_set("[a-z]{1,6}", 0..6),
        prop::collection::vec(arb_manifest(), 6),
        arb_manifest(),
    )
        .prop_map(|(ids, manifests, root)| {
            let mut packages: Vec<PackageModel> = ids
                .into_iter()
                .zip(manifests)
                .map(|(id, manifest)| PackageModel::new(PackageId::new(id), manifest))
                .collect();
            packages.push(PackageModel::new(
                PackageId::root(),
                Manifest {
                    specific: root.specific,
                    global: Vec::new(),
                },
            ));
            WorkspaceModel::new(packages)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn conflicts_never_pair_a_package_with_itself(model in arb_workspace()) {
        for f in find_conflicts(&model) {
            if let Finding::Conflict { first, second, .. } = f {
                prop_assert_ne!(first, second);
            }
        }
    }

    #[test]
    fn conflicts_never_report_reversed_pairs(model in arb_workspace()) {
        let pairs: BTreeSet<(String, String, String)> = find_conflicts(&model)
            .into_iter()
            .filter_map(|f| match f {
                Finding::Conflict { dependency, first, second } => {
                    Some((dependency, first.as_str().to_string(), second.as_str().to_string()))
                }
                _ => None,
            })
            .collect();
        for (dep, a, b) in &pairs {
            prop_assert!(
                !pairs.contains(&(dep.clone(), b.clone(), a.clone())),
                "pair {a}-{b} reported in both orders for {dep}"
            );
        }
    }

    #[test]
    fn conflicts_follow_discovery_order(model in arb_workspace()) {
        let position = |id: &PackageId| model.packages.iter().position(|p| &p.id == id);
        for f in find_conflicts(&model) {
            if let Finding::Conflict { first, second, .. } = f {
                prop_assert!(position(&first) < position(&second));
            }
        }
    }

    #[test]
    fn a_global_inherited_anywhere_is_never_unused(model in arb_workspace()) {
        let inherited: BTreeSet<&str> = model
            .members()
            .flat_map(|m| m.manifest.global.iter().map(String::as_str))
            .collect();
        for f in check_globals(&model) {
            prop_assert!(!inherited.contains(f.dependency()));
        }
    }

    #[test]
    fn adding_a_second_inheritor_changes_nothing(model in arb_workspace(), extra in arb_manifest()) {
        let before = check_globals(&model);

        let mut grown = model.clone();
        let duplicate_inheritor = Manifest {
            specific: Vec::new(),
            global: grown
                .members()
                .flat_map(|m| m.manifest.global.clone())
                .chain(extra.global)
                .collect(),
        };
        grown.packages.insert(0, PackageModel::new(PackageId::new("zz-extra"), duplicate_inheritor));
        let after = check_globals(&grown);

        // Only names the new package introduced may disappear.
        for f in &after {
            prop_assert!(before.contains(f));
        }
    }

    #[test]
    fn verifier_is_deterministic(model in arb_workspace()) {
        let used: Vec<(String, String)> = model
            .members()
            .flat_map(|m| {
                m.manifest
                    .declared_once()
                    .into_iter()
                    .step_by(2)
                    .map(|d| (m.id.as_str().to_string(), d.replace('-', "_")))
                    .collect::<Vec<_>>()
            })
            .collect();
        let refs: Vec<(&str, &str)> = used.iter().map(|(p, d)| (p.as_str(), d.as_str())).collect();
        let oracle = StaticOracle::used(&refs);

        let first = verify_usage(&model, &oracle);
        let second = verify_usage(&model, &oracle);
        prop_assert_eq!(first, second);
    }
}
