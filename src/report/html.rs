//! HTML report artifact
//!
//! Self-contained document with an organization/scan-time summary, the
//! six-column table, and the compliance notes footer. Suitable for pasting
//! into a review email; delivery itself is out of scope.

use super::{ReportMeta, ReportRenderer};
use crate::scanner::types::StaleRecord;

/// HTML renderer
pub struct HtmlReport;

impl HtmlReport {
    pub fn new() -> Self {
        Self
    }

    /// Escape HTML special characters
    fn escape_html(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '<' => "&lt;".to_string(),
                '>' => "&gt;".to_string(),
                '&' => "&amp;".to_string(),
                '"' => "&quot;".to_string(),
                '\'' => "&#39;".to_string(),
                _ => c.to_string(),
            })
            .collect()
    }
}

impl ReportRenderer for HtmlReport {
    fn file_name(&self) -> &'static str {
        "email.html"
    }

    fn render(&self, meta: &ReportMeta, records: &[StaleRecord]) -> String {
        let mut html = String::new();

        html.push_str("<h2>Stale GitHub Branch Audit Report</h2>\n");
        html.push_str(&format!(
            "<p><b>Organization:</b> {}</p>\n",
            Self::escape_html(&meta.organization)
        ));
        html.push_str(&format!(
            "<p><b>Scan Date:</b> {}</p>\n",
            meta.scan_time.format("%a %b %d %H:%M:%S %Z %Y")
        ));
        html.push_str(&format!(
            "<p>Branches inactive for <b>&ge; {} calendar months</b>.</p>\n",
            meta.months
        ));
        html.push_str(&format!(
            "<p><b>Total Stale Branches Found:</b> {}</p>\n\n",
            records.len()
        ));

        html.push_str(
            "<table border=\"1\" cellpadding=\"6\" cellspacing=\"0\" \
             style=\"border-collapse:collapse;\">\n",
        );
        html.push_str("<tr style=\"background:#f2f2f2;\">\n");
        for column in [
            "Repository",
            "Branch",
            "LastCommit(ET)",
            "AgeMonths",
            "Author",
            "Email",
        ] {
            html.push_str(&format!("  <th>{}</th>\n", column));
        }
        html.push_str("</tr>\n");

        for record in records {
            html.push_str("<tr>\n");
            html.push_str(&format!(
                "  <td>{}</td>\n",
                Self::escape_html(&record.repository)
            ));
            html.push_str(&format!(
                "  <td>{}</td>\n",
                Self::escape_html(&record.branch)
            ));
            html.push_str(&format!(
                "  <td>{}</td>\n",
                Self::escape_html(&record.last_commit_display())
            ));
            html.push_str(&format!(
                "  <td align=\"center\">{}</td>\n",
                record.age_months
            ));
            html.push_str(&format!(
                "  <td>{}</td>\n",
                Self::escape_html(&record.author_name)
            ));
            html.push_str(&format!(
                "  <td>{}</td>\n",
                Self::escape_html(&record.author_email)
            ));
            html.push_str("</tr>\n");
        }

        html.push_str("</table>\n\n");
        html.push_str("<br/>\n<b>Compliance Notes:</b>\n<ul>\n");
        html.push_str("  <li>Protected branches are excluded</li>\n");
        html.push_str("  <li>No branches were modified or deleted</li>\n");
        html.push_str("  <li>Deletion requires a separate approval-gated pipeline</li>\n");
        html.push_str("</ul>\n");

        html
    }
}
