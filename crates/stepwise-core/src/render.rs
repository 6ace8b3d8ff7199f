//! Plain-text rendering of a [`StatusReport`]

use crate::status::StatusReport;
use std::fmt::Write;

const APPLIED_MARK: &str = "[✓]";
const PENDING_MARK: &str = "[ ]";

/// Render the status report as a fixed-width table
///
/// ```text
/// Migration Status:
/// =================
///       VERSION  NAME     APPLIED AT
/// [✓]   000001   init     2026-01-02 03:04:05 UTC
/// [ ]   000002   add_col
///
/// 1 applied, 1 pending
/// ```
pub fn render_status_table(report: &StatusReport) -> String {
    let version_width = report
        .entries
        .iter()
        .map(|e| e.version.as_str().len())
        .chain(std::iter::once("VERSION".len()))
        .max()
        .unwrap_or(0);
    let name_width = report
        .entries
        .iter()
        .map(|e| e.name.len())
        .chain(std::iter::once("NAME".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str("Migration Status:\n");
    out.push_str("=================\n");

    if report.entries.is_empty() {
        out.push_str("No migrations found\n");
    } else {
        let _ = writeln!(
            out,
            "{:<5} {:<vw$}  {:<nw$}  APPLIED AT",
            "",
            "VERSION",
            "NAME",
            vw = version_width,
            nw = name_width
        );
        for entry in &report.entries {
            let mark = if entry.applied { APPLIED_MARK } else { PENDING_MARK };
            let applied_at = entry
                .applied_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default();
            let line = format!(
                "{:<5} {:<vw$}  {:<nw$}  {}",
                mark,
                entry.version.as_str(),
                entry.name,
                applied_at,
                vw = version_width,
                nw = name_width
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    if !report.orphaned.is_empty() {
        let orphaned: Vec<&str> = report.orphaned.iter().map(|v| v.as_str()).collect();
        let _ = writeln!(
            out,
            "\nApplied but missing from migrations directory: {}",
            orphaned.join(", ")
        );
    }

    let _ = writeln!(
        out,
        "\n{} applied, {} pending",
        report.applied_count(),
        report.pending_count()
    );
    out
}
