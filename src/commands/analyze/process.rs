//! Per-file pipeline: discover exports, turn each into a report row or a skip.

use std::path::{Path, PathBuf};

use wildmatch::WildMatch;

use super::analysis::analyze_issue;
use super::date::format_created_date;
use super::error::{AnalyzeError, Result};
use super::keywords::{extract_keywords, issue_text};
use super::models::IssueRecord;
use super::people::involved_people;
use super::report::{ReportRow, ReportWriter};
use crate::infra::openai::CompletionClient;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(ReportRow),
    Skipped { path: PathBuf, reason: String },
}

/// Outcomes of a whole run, in processing order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnalyzeSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl AnalyzeSummary {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Written(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

/// Files in `dir` whose name matches `pattern`, in directory-listing order.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = WildMatch::new(pattern);
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(AnalyzeError::from)? {
        let entry = entry.map_err(AnalyzeError::from)?;
        if !entry.file_type().map_err(AnalyzeError::from)?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_str().is_some_and(|n| matcher.matches(n)) {
            files.push(entry.path());
        }
    }

    Ok(files)
}

/// Build the report row for one export file.
///
/// The timestamp is validated before the model is called, so a bad file
/// costs no request. Model failures do not fail the file.
pub async fn analyze_file(
    client: &impl CompletionClient,
    path: &Path,
) -> std::result::Result<ReportRow, AnalyzeError> {
    let content = std::fs::read_to_string(path)?;
    let issue: IssueRecord =
        serde_json::from_str(&content).map_err(|e| AnalyzeError::InvalidRecord {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let created_date = format_created_date(&issue.created_at)?;
    let keywords = extract_keywords(&issue_text(&issue.title, &issue.body), issue.label_names());
    let analysis = analyze_issue(client, &issue).await;
    let people = involved_people(&issue);

    Ok(ReportRow::assemble(
        &issue,
        created_date,
        people,
        keywords,
        &analysis,
    ))
}

/// Process `files` one at a time, streaming each row into `writer`.
///
/// Bad input files are logged and skipped; only a failure to write the
/// report aborts the run.
pub async fn run_analysis<W: std::io::Write>(
    client: &impl CompletionClient,
    files: &[PathBuf],
    writer: &mut ReportWriter<W>,
) -> Result<AnalyzeSummary> {
    let mut summary = AnalyzeSummary::default();

    for path in files {
        let name = display_name(path);
        tracing::info!("Processing {name}...");

        let outcome = match analyze_file(client, path).await {
            Ok(row) => {
                writer.write_row(&row)?;
                FileOutcome::Written(row)
            }
            Err(e) => {
                tracing::warn!("Error processing {name}: {e}");
                FileOutcome::Skipped {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            }
        };
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
