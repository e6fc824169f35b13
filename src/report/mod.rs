//! Report Aggregation
//!
//! Renders the fixed-schema CSV, plain-text, and HTML artifacts from the
//! sorted stale-record sequence. Each artifact is a pure function of the
//! records and the scan metadata; when there are no records, nothing is
//! written and the output directory is not created.

pub mod csv;
pub mod html;
pub mod text;

use crate::scanner::types::StaleRecord;
use chrono::DateTime;
use chrono_tz::Tz;
use std::fs;
use std::io;
use std::path::Path;

/// Scan metadata stamped into every artifact
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub organization: String,
    pub scan_time: DateTime<Tz>,
    /// Configured staleness threshold in calendar months
    pub months: u32,
}

/// One renderable report artifact
pub trait ReportRenderer {
    /// File name of the artifact inside the output directory
    fn file_name(&self) -> &'static str;

    /// Render the artifact from sorted records and scan metadata
    fn render(&self, meta: &ReportMeta, records: &[StaleRecord]) -> String;
}

/// All artifacts produced by one audit run
pub fn renderers() -> Vec<Box<dyn ReportRenderer>> {
    vec![
        Box::new(csv::CsvReport::new()),
        Box::new(text::TextReport::new()),
        Box::new(html::HtmlReport::new()),
    ]
}

/// Stable sort by age descending; ties keep discovery order.
pub fn sort_records(records: &mut [StaleRecord]) {
    records.sort_by(|a, b| b.age_months.cmp(&a.age_months));
}

/// Sort the records and write every artifact into `output_dir`.
///
/// A scan with zero stale records writes nothing at all: the directory is
/// left absent rather than created empty.
pub fn write_reports(
    meta: &ReportMeta,
    records: &[StaleRecord],
    output_dir: &Path,
) -> io::Result<()> {
    if records.is_empty() {
        log::info!("No stale branches found; no report written");
        return Ok(());
    }

    let mut sorted = records.to_vec();
    sort_records(&mut sorted);

    fs::create_dir_all(output_dir)?;
    for renderer in renderers() {
        let path = output_dir.join(renderer.file_name());
        fs::write(&path, renderer.render(meta, &sorted))?;
        log::info!("Wrote {}", path.display());
    }

    log::info!("Stale branch report generated. Count: {}", sorted.len());
    Ok(())
}
