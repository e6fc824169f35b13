//! Plain-text report artifact

use super::{ReportMeta, ReportRenderer};
use crate::scanner::types::StaleRecord;

/// Plain-text renderer: a short scan header, then one block per record
pub struct TextReport;

impl TextReport {
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for TextReport {
    fn file_name(&self) -> &'static str {
        "stale_report.txt"
    }

    fn render(&self, meta: &ReportMeta, records: &[StaleRecord]) -> String {
        let mut result = String::new();

        result.push_str("Stale GitHub Branch Audit Report\n");
        result.push_str(&format!("Organization: {}\n", meta.organization));
        result.push_str(&format!(
            "Scan Date: {}\n",
            meta.scan_time.format("%a %b %d %H:%M:%S %Z %Y")
        ));
        result.push_str(&format!(
            "Threshold: >= {} calendar months\n",
            meta.months
        ));
        result.push_str(&format!("Total Stale Branches Found: {}\n\n", records.len()));

        for record in records {
            result.push_str(&format!("Repository: {}\n", record.repository));
            result.push_str(&format!("Branch: {}\n", record.branch));
            result.push_str(&format!(
                "Last Commit (ET): {}\n",
                record.last_commit_display()
            ));
            result.push_str(&format!("Age (Months): {}\n", record.age_months));
            result.push_str(&format!("Author: {}\n", record.author_name));
            result.push_str(&format!("Email: {}\n", record.author_email));
            result.push('\n');
        }

        result
    }
}
