// ============================================================
// CSV PARSER
// ============================================================
// Parse delimited lead files into header-keyed row maps

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::csv::RawTable;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::decode_bytes;

/// CSV parser with encoding and delimiter detection
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            // Cell values pass through untouched so personalization
            // columns keep their original text.
            trim: false,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse a CSV file from disk
    pub fn parse_file(&self, path: &Path) -> Result<RawTable> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;
        let content = decode_bytes(&bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Tolerate rows with fewer fields than the header
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        let mut index = 0;

        for result in reader.records() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > headers.len() {
                return Err(AppError::ParseError(format!(
                    "Row {} has {} fields, expected at most {}",
                    index + 1,
                    record.len(),
                    headers.len()
                )));
            }

            rows.push(self.parse_row(&headers, &record));
            index += 1;
        }

        if rows.is_empty() {
            return Err(AppError::ParseError("CSV file is empty".to_string()));
        }

        Ok(RawTable { headers, rows })
    }

    /// Build a header-keyed map for one record. Missing trailing fields
    /// are left out of the map; duplicate headers keep the first value.
    fn parse_row(&self, headers: &[String], record: &StringRecord) -> HashMap<String, String> {
        let mut row = HashMap::new();

        for (idx, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(idx) {
                row.entry(header.clone()).or_insert_with(|| value.to_string());
            }
        }

        row
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();

            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }

    /// Parse a CSV file with automatic delimiter detection
    pub fn parse_file_auto_detect(path: &Path) -> Result<RawTable> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;
        let content = decode_bytes(&bytes);
        Self::parse_content_auto_detect(&content)
    }

    /// Parse CSV content with automatic delimiter detection
    pub fn parse_content_auto_detect(content: &str) -> Result<RawTable> {
        let delimiter = Self::detect_delimiter(content);
        Self::default().with_delimiter(delimiter).parse_content(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let parser = CsvParser::new();
        let table = parser.parse_content(content).unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["name"], "Alice");
        assert_eq!(table.rows[1]["city"], "LA");
    }

    #[test]
    fn test_short_row_omits_missing_columns() {
        let content = "name,age,city\nAlice,30";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("age").map(String::as_str), Some("30"));
        assert!(table.rows[0].get("city").is_none());
    }

    #[test]
    fn test_long_row_is_rejected() {
        let content = "name,age\nAlice,30,extra";
        let err = CsvParser::new().parse_content(content).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_header_only_input_is_rejected() {
        let err = CsvParser::new().parse_content("name,age").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));

        let err = CsvParser::new().parse_content("").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_duplicate_header_keeps_first_value() {
        let content = "phone,phone\n111,222";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows[0]["phone"], "111");
    }

    #[test]
    fn test_quoted_field_with_delimiter() {
        let content = "name,notes\nAlice,\"likes cats, dogs\"";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows[0]["notes"], "likes cats, dogs");
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let content = "name,nickname\n Alice ,  Al";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.rows[0]["name"], " Alice ");
        assert_eq!(table.rows[0]["nickname"], "  Al");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a|b|c\nd|e|f"), b'|');
    }

    #[test]
    fn test_auto_detect_parses_semicolons() {
        let content = "name;age\nAlice;30";
        let table = CsvParser::parse_content_auto_detect(content).unwrap();

        assert_eq!(table.headers, vec!["name", "age"]);
        assert_eq!(table.rows[0]["age"], "30");
    }
}
