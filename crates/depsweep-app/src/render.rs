//! Render use cases: human-readable text and the JSON envelope.

use anyhow::Context;
use depsweep_domain::checks::GLOBAL_USAGE_THRESHOLD;
use depsweep_types::{CheckStatus, Finding, PackageId, Report, UndeterminedUsage, Verdict, ids};

/// Render the report as the plain text written to stdout.
///
/// Sections, separated by blank lines: discovered packages, the global-usage line,
/// conflicts, per-package usage problems, manifest diagnostics, verdict.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    let packages: Vec<String> = report.packages.iter().map(|p| p.id.to_string()).collect();
    out.push_str(&format!("Packages: [{}]\n\n", packages.join(", ")));

    out.push_str(&globals_line(report));

    let conflicts: Vec<&Finding> = report
        .findings
        .iter()
        .filter(|f| matches!(f, Finding::Conflict { .. }))
        .collect();
    if !conflicts.is_empty() {
        out.push('\n');
        for f in conflicts {
            out.push_str(&format!("{f}\n"));
        }
    }

    // Unused and undetermined pairs, grouped per package in discovery order.
    for entry in &report.packages {
        let mut lines: Vec<String> = report
            .findings
            .iter()
            .filter(|f| matches!(f, Finding::UnusedInPackage { package, .. } if *package == entry.id))
            .map(ToString::to_string)
            .collect();
        lines.extend(
            report
                .undetermined
                .iter()
                .filter(|u| undetermined_package(u) == &entry.id)
                .map(ToString::to_string),
        );
        if lines.is_empty() {
            continue;
        }
        out.push('\n');
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }

    if !report.diagnostics.is_empty() {
        out.push('\n');
        for d in &report.diagnostics {
            out.push_str(&format!("{d}\n"));
        }
    }

    let verdict = match report.verdict {
        Verdict::Pass => "pass",
        Verdict::Warn => "warn",
        Verdict::Fail => "fail",
    };
    out.push_str(&format!(
        "\nVerdict: {verdict} ({} finding{})\n",
        report.findings.len(),
        plural(report.findings.len())
    ));

    out
}

fn globals_line(report: &Report) -> String {
    if report
        .check(ids::CHECK_GLOBALS_UNUSED)
        .is_some_and(|c| c.status == CheckStatus::Skipped)
    {
        return "Global dependency check skipped\n".to_string();
    }

    let unused: Vec<&str> = report
        .findings
        .iter()
        .filter(|f| matches!(f, Finding::UnusedGlobal { .. }))
        .map(Finding::dependency)
        .collect();

    if unused.is_empty() {
        format!(
            "Every global dependency is used at least {GLOBAL_USAGE_THRESHOLD} time{}\n",
            plural(GLOBAL_USAGE_THRESHOLD)
        )
    } else {
        format!(
            "The global dependencies [{}] are used by fewer than {GLOBAL_USAGE_THRESHOLD} package{}\n",
            unused.join(", "),
            plural(GLOBAL_USAGE_THRESHOLD)
        )
    }
}

fn undetermined_package(u: &UndeterminedUsage) -> &PackageId {
    match u {
        UndeterminedUsage::NoInformation { package, .. }
        | UndeterminedUsage::TimedOut { package, .. } => package,
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn serialize_report(report: &Report) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}
