use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Output of a successful parse: header names in file order plus one
/// header-keyed value map per data row.
///
/// A row's key set is always a subset of `headers`; rows that came up short
/// simply have no entry for their missing trailing columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<HashMap<String, String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_header_is_exact() {
        let table = RawTable::new(vec!["Phone".to_string(), "Notes".to_string()], Vec::new());

        assert!(table.has_header("Phone"));
        assert!(!table.has_header("phone"));
        assert!(!table.has_header("Email"));
    }
}
