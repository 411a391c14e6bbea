//! CSV reader
//!
//! Reads tabular input into a [`TabularModel`]. Delimiter detection looks
//! at the first line and picks the most frequent candidate among comma,
//! semicolon, tab, pipe and colon. The first row is always the header; row
//! lengths are flexible.

use shapecast_core::{ConvertError, Result, TabularModel};

/// CSV reader for the tabular input path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CsvReader;

impl CsvReader {
    /// Create a new reader instance
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Detect the delimiter from the first line.
    ///
    /// Counts occurrences of each candidate delimiter and picks the most
    /// frequent one; a line without any candidate falls back to comma.
    fn detect_delimiter(content: &str) -> char {
        let first_line = content.lines().next().unwrap_or_default();
        let delimiters = [',', ';', '\t', '|', ':'];

        let mut best_delimiter = ',';
        let mut max_count = 0;
        for &delim in &delimiters {
            let count = first_line.matches(delim).count();
            if count > max_count {
                max_count = count;
                best_delimiter = delim;
            }
        }
        best_delimiter
    }

    /// Read a byte stream into a tabular model.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Structure`] when the stream is empty or the CSV
    /// reader reports a structural failure.
    pub fn read_bytes(&self, data: &[u8]) -> Result<TabularModel> {
        let content = String::from_utf8_lossy(data);
        self.read_str(&content)
    }

    /// Read string content into a tabular model.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Structure`] when the content is empty or unreadable.
    pub fn read_str(&self, content: &str) -> Result<TabularModel> {
        if content.trim().is_empty() {
            return Err(ConvertError::Structure(
                "CSV input is empty".to_string(),
            ));
        }

        let delimiter = Self::detect_delimiter(content);
        log::debug!("reading CSV with delimiter {delimiter:?}");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .flexible(true)
            .has_headers(false)
            .from_reader(content.as_bytes());

        let mut headers: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| ConvertError::Structure(format!("CSV read error: {e}")))?;
            let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
            if headers.is_empty() {
                headers = fields;
            } else {
                rows.push(fields);
            }
        }

        if headers.is_empty() {
            return Err(ConvertError::Structure(
                "CSV input has no header row".to_string(),
            ));
        }

        log::debug!("read {} data rows, {} columns", rows.len(), headers.len());
        Ok(TabularModel { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_comma_csv() {
        let table = CsvReader::new()
            .read_str("id,latitude,longitude\n1,40.7128,-74.0060\n")
            .unwrap();
        assert_eq!(table.headers, vec!["id", "latitude", "longitude"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], "40.7128");
    }

    #[test]
    fn test_semicolon_delimiter_detected() {
        let table = CsvReader::new()
            .read_str("id;x;y\n1;10;20\n2;30;40\n")
            .unwrap();
        assert_eq!(table.headers, vec!["id", "x", "y"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let table = CsvReader::new().read_str("a,b,c\n1,2\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn test_empty_input_is_structure_error() {
        match CsvReader::new().read_str("   \n") {
            Err(ConvertError::Structure(_)) => {}
            other => panic!("expected Structure error, got {other:?}"),
        }
    }

    #[test]
    fn test_quoted_wkt_values_survive() {
        let table = CsvReader::new()
            .read_str("id,geometry\n1,\"LINESTRING(0 0,1 1)\"\n")
            .unwrap();
        assert_eq!(table.rows[0][1], "LINESTRING(0 0,1 1)");
    }
}
