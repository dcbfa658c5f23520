//! The report CSV as a rectangular grid of strings.

use std::io::Read;
use std::path::Path;

use super::error::PublishError;

/// Header row followed by every data row, all cells as written on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGrid {
    rows: Vec<Vec<String>>,
}

impl ValueGrid {
    pub fn from_path(path: &Path) -> Result<Self, PublishError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file).map_err(|e| match e {
            GridError::Csv(source) => PublishError::ReadTable {
                path: path.to_path_buf(),
                source,
            },
            GridError::Empty => PublishError::EmptyTable(path.to_path_buf()),
        })
    }

    fn from_reader(reader: impl Read) -> Result<Self, GridError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = csv
            .headers()
            .map_err(GridError::Csv)?
            .iter()
            .map(str::to_string)
            .collect();
        if header.is_empty() {
            return Err(GridError::Empty);
        }

        let width = header.len();
        let mut rows = vec![header];
        for record in csv.records() {
            let record = record.map_err(GridError::Csv)?;
            if record.len() > width {
                tracing::warn!(
                    line = record.position().map(|p| p.line()),
                    cells = record.len(),
                    width,
                    "dropping cells beyond the header width"
                );
            }
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Number of data rows (excluding the header).
    pub fn data_rows(&self) -> usize {
        self.rows.len() - 1
    }
}

#[derive(Debug)]
enum GridError {
    Csv(csv::Error),
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn grid_has_header_plus_every_data_row() {
        let csv = indoc! {"
            Issue Number,Title,Critical
            1,First,No
            2,\"Second, with comma\",Yes
            3,Third,No
        "};

        let grid = ValueGrid::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(grid.rows().len(), 4);
        assert_eq!(grid.data_rows(), 3);
        assert_eq!(grid.header(), ["Issue Number", "Title", "Critical"]);
        assert_eq!(grid.rows()[2], ["2", "Second, with comma", "Yes"]);
    }

    #[test]
    fn values_are_kept_verbatim() {
        let csv = "Issue Number,AI Summary\n007,\"multi\nline\"\n";

        let grid = ValueGrid::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(grid.rows()[1], ["007", "multi\nline"]);
    }

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let csv = "a,b,c\n1\n1,2,3\n";

        let grid = ValueGrid::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(grid.rows()[1], ["1", "", ""]);
        assert!(grid.rows().iter().all(|r| r.len() == 3));
    }

    #[test]
    fn long_rows_are_truncated_to_header_width() {
        let csv = "a,b\n1,2,3,4\n5,6\n";

        let grid = ValueGrid::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(grid.rows()[1], ["1", "2"]);
        assert_eq!(grid.rows()[2], ["5", "6"]);
        assert!(grid.rows().iter().all(|r| r.len() == 2));
    }

    #[test]
    fn header_only_file_yields_single_row() {
        let grid = ValueGrid::from_reader("a,b\n".as_bytes()).unwrap();
        assert_eq!(grid.rows().len(), 1);
        assert_eq!(grid.data_rows(), 0);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(
            ValueGrid::from_reader("".as_bytes()),
            Err(GridError::Empty)
        ));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ValueGrid::from_path(&dir.path().join("issue_summary.csv")).unwrap_err();
        assert!(matches!(err, PublishError::Io(_)));
    }
}
