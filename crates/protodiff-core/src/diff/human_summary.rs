//! Human-readable summary renderer for compatibility reports.

use crate::diff::model::{ChangeCategory, Report};

/// Render a Markdown summary of a [`Report`].
///
/// Intended for review comments and CI logs. It is informational only; the
/// per-change `Display` lines are the stable contract.
pub fn render_human_summary(report: &Report) -> String {
    let mut out = String::new();

    out.push_str("## Schema Compatibility\n\n");

    if report.is_empty() {
        out.push_str("**Verdict**: Compatible\n\n");
        out.push_str("_No breaking changes detected._\n");
        return out;
    }

    let noun = if report.len() == 1 {
        "problem"
    } else {
        "problems"
    };
    out.push_str(&format!(
        "**Verdict**: Breaking ({} {})\n\n",
        report.len(),
        noun
    ));

    let sections = [
        (ChangeCategory::Removal, "Removed Declarations"),
        (ChangeCategory::Mutation, "Changed Declarations"),
        (ChangeCategory::Reservation, "Dropped Reservations"),
    ];

    for (category, title) in sections {
        let lines: Vec<String> = report
            .iter()
            .filter(|c| c.category() == category)
            .map(|c| format!("- {}\n", c))
            .collect();
        if lines.is_empty() {
            continue;
        }
        out.push_str(&format!("### {} ({})\n\n", title, lines.len()));
        for line in lines {
            out.push_str(&line);
        }
        out.push('\n');
    }

    out
}
