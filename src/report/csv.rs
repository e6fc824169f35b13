//! CSV report artifact

use super::{ReportMeta, ReportRenderer};
use crate::scanner::types::StaleRecord;

/// Fixed six-column header shared with the HTML table
pub const CSV_HEADER: &str = "Repository,Branch,LastCommit(ET),AgeMonths,Author,Email";

/// CSV renderer
pub struct CsvReport;

impl CsvReport {
    pub fn new() -> Self {
        Self
    }

    /// Quote a value when it contains the delimiter, quotes, or newlines
    fn escape_csv_value(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl ReportRenderer for CsvReport {
    fn file_name(&self) -> &'static str {
        "stale_report.csv"
    }

    fn render(&self, _meta: &ReportMeta, records: &[StaleRecord]) -> String {
        let mut result = String::from(CSV_HEADER);
        result.push('\n');

        for record in records {
            let fields = [
                Self::escape_csv_value(&record.repository),
                Self::escape_csv_value(&record.branch),
                Self::escape_csv_value(&record.last_commit_display()),
                record.age_months.to_string(),
                Self::escape_csv_value(&record.author_name),
                Self::escape_csv_value(&record.author_email),
            ];
            result.push_str(&fields.join(","));
            result.push('\n');
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixtures::{meta, record};
    use super::*;

    #[test]
    fn test_header_row_is_exact() {
        let body = CsvReport::new().render(&meta(), &[]);
        assert_eq!(
            body.lines().next().unwrap(),
            "Repository,Branch,LastCommit(ET),AgeMonths,Author,Email"
        );
    }

    #[test]
    fn test_one_row_per_record_in_given_order() {
        let records = vec![record("repo-a", "feature/x", 7), record("repo-b", "y", 3)];
        let body = CsvReport::new().render(&meta(), &records);

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "repo-a,feature/x,2023-06-15 08:00 AM EDT,7,Dana Developer,dana@example.com"
        );
        assert!(lines[2].starts_with("repo-b,y,"));
    }

    #[test]
    fn test_embedded_commas_and_quotes_are_escaped() {
        let mut tricky = record("repo-a", "feature/x", 4);
        tricky.author_name = "Dev, \"The Author\"".to_string();
        let body = CsvReport::new().render(&meta(), &[tricky]);

        assert!(body.contains(r#""Dev, ""The Author""""#));
    }
}
