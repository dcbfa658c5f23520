use chrono::NaiveDateTime;

use super::error::AnalyzeError;

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reformat a `YYYY-MM-DDTHH:MM:SSZ` timestamp as `YYYY-MM-DD`.
pub fn format_created_date(created_at: &str) -> Result<String, AnalyzeError> {
    NaiveDateTime::parse_from_str(created_at, CREATED_AT_FORMAT)
        .map(|dt| dt.format(REPORT_DATE_FORMAT).to_string())
        .map_err(|_| AnalyzeError::InvalidDate {
            value: created_at.to_string(),
        })
}
