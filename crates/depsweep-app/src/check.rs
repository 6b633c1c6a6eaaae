//! The `check` use case: discover the workspace, run the checks, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use depsweep_domain::oracle::UsageOracle;
use depsweep_settings::{Overrides, ResolvedConfig};
use depsweep_types::{PackageEntry, Report, SCHEMA_REPORT_V1, ToolMeta, Verdict};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Repository root path.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: Report,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case with the usage oracle selected by the configuration.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let resolved = resolve(&input)?;
    let oracle = depsweep_search::build_oracle(input.repo_root, &resolved.search);
    check_with(input.repo_root, resolved, oracle.as_ref())
}

/// Run the check use case against a caller-supplied oracle.
pub fn run_check_with_oracle(
    input: CheckInput<'_>,
    oracle: &dyn UsageOracle,
) -> anyhow::Result<CheckOutput> {
    let resolved = resolve(&input)?;
    check_with(input.repo_root, resolved, oracle)
}

fn resolve(input: &CheckInput<'_>) -> anyhow::Result<ResolvedConfig> {
    // Empty is allowed, defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        depsweep_settings::DepsweepConfigV1::default()
    } else {
        depsweep_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    depsweep_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")
}

fn check_with(
    repo_root: &Utf8Path,
    resolved: ResolvedConfig,
    oracle: &dyn UsageOracle,
) -> anyhow::Result<CheckOutput> {
    let scan = depsweep_repo::build_workspace_model(repo_root, &resolved.discovery)
        .context("build workspace model")?;

    let domain_report = depsweep_domain::evaluate(&scan.model, oracle, &resolved.effective);

    let findings = domain_report.findings();
    let undetermined = domain_report.undetermined();
    // Manifest diagnostics can only downgrade a pass; the domain never sees them.
    let verdict = depsweep_domain::compute_verdict(
        findings.len(),
        undetermined.len() + scan.diagnostics.len(),
        resolved.effective.fail_on,
    );

    tracing::debug!(
        packages = domain_report.packages_scanned,
        dependencies = domain_report.dependencies_scanned,
        findings = findings.len(),
        ?verdict,
        "check complete"
    );

    let packages = scan
        .model
        .packages
        .iter()
        .map(|p| PackageEntry {
            id: p.id.clone(),
            specific: p.manifest.specific.clone(),
            global: p.manifest.global.clone(),
        })
        .collect();

    let report = Report {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "depsweep".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        verdict,
        packages,
        checks: domain_report.summaries(),
        findings,
        undetermined,
        diagnostics: scan.diagnostics,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use depsweep_domain::oracle::{SearchError, SearchOutcome, UsageQuery};
    use depsweep_search::SearchEngine;
    use depsweep_types::{CheckStatus, Diagnostic, Finding, PackageId, UndeterminedUsage, ids};

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    /// Root declares serde and tokio; `a` inherits serde and pins rand; `b` pins rand.
    fn scenario() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");

        write_file(
            &root.join("Cargo.toml"),
            "[workspace]\nmembers = [\"a\", \"b\"]\n\n[workspace.dependencies]\nserde = \"1\"\ntokio = \"1\"\n",
        );
        write_file(
            &root.join("a/Cargo.toml"),
            "[package]\nname = \"a\"\n\n[dependencies]\nserde.workspace = true\nrand = \"0.9\"\n",
        );
        write_file(&root.join("a/src/lib.rs"), "use serde::Serialize;\n");
        write_file(
            &root.join("b/Cargo.toml"),
            "[package]\nname = \"b\"\n\n[dependencies]\nrand = \"0.9\"\n",
        );
        write_file(&root.join("b/src/lib.rs"), "pub fn roll() -> u8 { rand::random() }\n");

        (tmp, root)
    }

    fn native_input(root: &Utf8Path) -> CheckInput<'_> {
        CheckInput {
            repo_root: root,
            config_text: "",
            overrides: Overrides {
                engine: Some("native".to_string()),
                timeout_ms: None,
            },
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let (_tmp, root) = scenario();

        let input = CheckInput {
            repo_root: &root,
            config_text: "",
            overrides: Overrides::default(),
        };
        let output = run_check_with_oracle(input, &AlwaysUsed).expect("run_check");
        assert_eq!(output.resolved_config.search.engine, SearchEngine::Ripgrep);
        assert_eq!(output.resolved_config.discovery.manifest_name, "Cargo.toml");
    }

    #[test]
    fn scenario_produces_all_three_findings() {
        let (_tmp, root) = scenario();

        let output = run_check(native_input(&root)).expect("run_check");
        let report = output.report;

        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.verdict, Verdict::Fail);
        let ids: Vec<&str> = report.packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "."]);
        assert_eq!(
            report.findings,
            vec![
                Finding::UnusedGlobal {
                    dependency: "tokio".to_string()
                },
                Finding::Conflict {
                    dependency: "rand".to_string(),
                    first: PackageId::new("a"),
                    second: PackageId::new("b"),
                },
                Finding::UnusedInPackage {
                    package: PackageId::new("a"),
                    dependency: "rand".to_string(),
                },
            ]
        );
        assert!(report.undetermined.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn fail_on_never_downgrades_to_warn() {
        let (_tmp, root) = scenario();

        let input = CheckInput {
            config_text: "fail_on = \"never\"\n",
            ..native_input(&root)
        };
        let output = run_check(input).expect("run_check");
        assert_eq!(output.report.verdict, Verdict::Warn);
        assert_eq!(output.report.findings.len(), 3);
    }

    #[test]
    fn disabled_and_allowlisted_checks_are_respected() {
        let (_tmp, root) = scenario();

        let config = r#"
[checks."deps.conflict"]
enabled = false

[checks."globals.unused"]
allow = ["tok*"]
"#;
        let input = CheckInput {
            config_text: config,
            ..native_input(&root)
        };
        let report = run_check(input).expect("run_check").report;

        assert_eq!(
            report.check(ids::CHECK_DEPS_CONFLICT).map(|c| c.status),
            Some(CheckStatus::Skipped)
        );
        assert_eq!(
            report.check(ids::CHECK_GLOBALS_UNUSED).map(|c| c.status),
            Some(CheckStatus::Clean)
        );
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].check_id(), ids::CHECK_DEPS_UNUSED);
    }

    #[test]
    fn clean_workspace_passes() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        write_file(
            &root.join("Cargo.toml"),
            "[workspace.dependencies]\nanyhow = \"1\"\n",
        );
        write_file(
            &root.join("core/Cargo.toml"),
            "[dependencies]\nanyhow = { workspace = true }\n",
        );
        write_file(
            &root.join("core/src/lib.rs"),
            "pub fn f() -> anyhow::Result<()> { Ok(()) }\n",
        );

        let output = run_check(native_input(&root)).expect("run_check");
        assert_eq!(output.report.verdict, Verdict::Pass);
        assert!(output.report.findings.is_empty());
        assert_eq!(verdict_exit_code(output.report.verdict), 0);
    }

    #[test]
    fn unreadable_manifest_warns_and_continues() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        write_file(&root.join("Cargo.toml"), "[workspace]\n");
        std::fs::create_dir_all(root.join("broken")).expect("mkdir");
        std::fs::write(root.join("broken/Cargo.toml"), [0xFF, 0xFE]).expect("write");

        let report = run_check(native_input(&root)).expect("run_check").report;
        assert_eq!(report.verdict, Verdict::Warn);
        assert!(report.findings.is_empty());
        assert!(matches!(
            report.diagnostics.as_slice(),
            [Diagnostic::ManifestUnreadable { package, .. }] if package.as_str() == "broken"
        ));
    }

    #[test]
    fn failed_searches_are_reported_as_no_information() {
        let (_tmp, root) = scenario();

        let input = CheckInput {
            repo_root: &root,
            config_text: "",
            overrides: Overrides::default(),
        };
        let report = run_check_with_oracle(input, &Failing).expect("run_check").report;

        assert!(
            report
                .findings
                .iter()
                .all(|f| !matches!(f, Finding::UnusedInPackage { .. }))
        );
        assert_eq!(report.undetermined.len(), 3);
        assert!(
            report
                .undetermined
                .iter()
                .all(|u| matches!(u, UndeterminedUsage::NoInformation { .. }))
        );
    }

    #[test]
    fn invalid_config_is_an_error() {
        let (_tmp, root) = scenario();

        let input = CheckInput {
            config_text: "fail_on = \"maybe\"\n",
            ..native_input(&root)
        };
        let err = run_check(input).unwrap_err();
        assert!(format!("{err:#}").contains("resolve config"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Warn), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }

    /// Reports every dependency as used.
    struct AlwaysUsed;

    impl UsageOracle for AlwaysUsed {
        fn find_usage(
            &self,
            _package: &PackageId,
            _query: &UsageQuery,
        ) -> Result<SearchOutcome, SearchError> {
            Ok(SearchOutcome::Found)
        }
    }

    struct Failing;

    impl UsageOracle for Failing {
        fn find_usage(
            &self,
            _package: &PackageId,
            _query: &UsageQuery,
        ) -> Result<SearchOutcome, SearchError> {
            Err(SearchError::Terminated {
                program: "rg".to_string(),
            })
        }
    }
}
