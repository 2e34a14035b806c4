// ============================================================
// LEAD DOMAIN MODEL
// ============================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DIGITS_ONLY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+$").expect("digits pattern is valid")
});

/// A phone value is deliverable only when, after trimming surrounding
/// whitespace, it is one or more ASCII digits and nothing else. No
/// formatting is stripped; separators and a leading plus are invalid.
pub fn validate_phone(value: &str) -> bool {
    DIGITS_ONLY_PATTERN.is_match(value.trim())
}

/// A lead as produced by an import run, before it is assigned a row id
/// by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    /// Extra columns from the source file that were not mapped to a
    /// standard field, keyed by the original header text.
    pub personalization: BTreeMap<String, serde_json::Value>,
    pub stop_sending: bool,
    pub created_at: DateTime<Utc>,
}

/// A stored lead attached to a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub campaign_id: String,
    #[serde(flatten)]
    pub record: LeadRecord,
}

/// Outcome of a single import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub accepted: Vec<LeadRecord>,
    pub rejected_count: usize,
}

impl ImportResult {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Human-readable outcome line shown after an import.
    pub fn summary(&self) -> String {
        if self.accepted.is_empty() {
            return format!(
                "No valid leads found. {} invalid phone numbers.",
                self.rejected_count
            );
        }
        if self.rejected_count > 0 {
            format!(
                "Imported {} leads; skipped {} due to invalid phone numbers.",
                self.accepted.len(),
                self.rejected_count
            )
        } else {
            format!("Imported {} leads.", self.accepted.len())
        }
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_accepts_plain_digits() {
        assert!(validate_phone("5551234567"));
        assert!(validate_phone("13853430571"));
        assert!(validate_phone("1"));
    }

    #[test]
    fn test_validate_phone_rejects_formatting() {
        assert!(!validate_phone("555-123-4567"));
        assert!(!validate_phone("+15551234567"));
        assert!(!validate_phone("(555) 123-4567"));
    }

    #[test]
    fn test_validate_phone_rejects_empty_and_text() {
        assert!(!validate_phone(""));
        assert!(!validate_phone("   "));
        assert!(!validate_phone("N/A"));
        assert!(!validate_phone("555 1234"));
    }

    #[test]
    fn test_validate_phone_ignores_surrounding_whitespace() {
        assert!(validate_phone(" 5551234567 "));
    }

    #[test]
    fn test_summary_mixed() {
        let result = ImportResult {
            accepted: vec![sample_record(); 3],
            rejected_count: 2,
        };
        assert_eq!(
            result.summary(),
            "Imported 3 leads; skipped 2 due to invalid phone numbers."
        );
    }

    #[test]
    fn test_summary_clean() {
        let result = ImportResult {
            accepted: vec![sample_record(); 2],
            rejected_count: 0,
        };
        assert_eq!(result.summary(), "Imported 2 leads.");
    }

    #[test]
    fn test_summary_nothing_accepted() {
        let result = ImportResult {
            accepted: vec![],
            rejected_count: 4,
        };
        assert_eq!(
            result.summary(),
            "No valid leads found. 4 invalid phone numbers."
        );
    }

    fn sample_record() -> LeadRecord {
        LeadRecord {
            phone: "5551234567".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            company_name: "Analytical Engines".to_string(),
            personalization: BTreeMap::new(),
            stop_sending: false,
            created_at: Utc::now(),
        }
    }
}
