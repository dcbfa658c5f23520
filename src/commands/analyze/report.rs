//! Flattened report rows and the streaming CSV writer.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::analysis::Analysis;
use super::error::AnalyzeError;
use super::models::IssueRecord;

pub const HEADERS: [&str; 11] = [
    "Issue Number",
    "Title",
    "Created Date",
    "Status",
    "Assigned",
    "Number of Responses",
    "People Involved",
    "Critical",
    "AI Summary",
    "Keywords",
    "URL",
];

/// One display-ready line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub issue_number: u64,
    pub title: String,
    pub created_date: String,
    pub status: String,
    pub assigned: bool,
    pub responses: usize,
    pub people: Vec<String>,
    pub critical: bool,
    pub summary: String,
    pub keywords: Vec<String>,
    pub url: String,
}

impl ReportRow {
    pub fn assemble(
        issue: &IssueRecord,
        created_date: String,
        people: BTreeSet<String>,
        keywords: BTreeSet<String>,
        analysis: &Analysis,
    ) -> Self {
        Self {
            issue_number: issue.number,
            title: issue.title.clone(),
            created_date,
            status: issue.state.clone(),
            assigned: issue.is_assigned(),
            responses: issue.comments.len(),
            people: people.into_iter().collect(),
            critical: analysis.critical,
            summary: analysis.summary_or_fallback().to_string(),
            keywords: keywords.into_iter().collect(),
            url: issue.url.clone(),
        }
    }

    /// Cell values in `HEADERS` order.
    pub fn to_record(&self) -> [String; 11] {
        [
            self.issue_number.to_string(),
            self.title.clone(),
            self.created_date.clone(),
            self.status.clone(),
            yes_no(self.assigned).to_string(),
            self.responses.to_string(),
            self.people.join(", "),
            yes_no(self.critical).to_string(),
            self.summary.clone(),
            self.keywords.join(", "),
            self.url.clone(),
        ]
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Writes the header up front, then one flushed row per call.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ReportWriter<File> {
    pub fn create(path: &Path) -> Result<Self, AnalyzeError> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Result<Self, AnalyzeError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(HEADERS)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn write_row(&mut self, row: &ReportRow) -> Result<(), AnalyzeError> {
        self.writer.write_record(row.to_record())?;
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Result<W, AnalyzeError> {
        self.writer
            .into_inner()
            .map_err(|e| AnalyzeError::Io(e.into_error()))
    }
}
