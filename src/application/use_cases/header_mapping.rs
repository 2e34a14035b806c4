// Centralized header candidate configuration for lead import mapping.
//
// Goal: keep column detection flexible without scattering candidate lists.

use crate::domain::csv::{FieldMapping, LeadField};

// NOTE:
// - Candidates are matched against a normalized header (trimmed, lowercase).
// - Matching strategy: exact whole-header match only.
// - The first header in file order that matches a field wins; later
//   matches for the same field are ignored.

pub const PHONE_CANDIDATES: &[&str] = &["phone", "phone number", "phone numbers"];

pub const FIRST_NAME_CANDIDATES: &[&str] = &["first name", "firstname", "first"];

pub const LAST_NAME_CANDIDATES: &[&str] = &["last name", "lastname", "last"];

pub const COMPANY_NAME_CANDIDATES: &[&str] = &["company", "company name", "business"];

pub fn normalize_header(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

pub fn detect_field(normalized_header: &str) -> Option<LeadField> {
    if PHONE_CANDIDATES.contains(&normalized_header) {
        return Some(LeadField::Phone);
    }
    if FIRST_NAME_CANDIDATES.contains(&normalized_header) {
        return Some(LeadField::FirstName);
    }
    if LAST_NAME_CANDIDATES.contains(&normalized_header) {
        return Some(LeadField::LastName);
    }
    if COMPANY_NAME_CANDIDATES.contains(&normalized_header) {
        return Some(LeadField::CompanyName);
    }
    None
}

/// Guess which columns hold the standard lead fields. Headers that match
/// nothing are left for personalization.
pub fn infer_mapping(headers: &[String]) -> FieldMapping {
    let mut mapping = FieldMapping::default();

    for header in headers {
        let key = normalize_header(header);

        match detect_field(&key) {
            Some(LeadField::Phone) if mapping.phone.is_none() => {
                mapping.phone = Some(header.clone());
            }
            Some(LeadField::FirstName) if mapping.first_name.is_none() => {
                mapping.first_name = Some(header.clone());
            }
            Some(LeadField::LastName) if mapping.last_name.is_none() => {
                mapping.last_name = Some(header.clone());
            }
            Some(LeadField::CompanyName) if mapping.company_name.is_none() => {
                mapping.company_name = Some(header.clone());
            }
            _ => {}
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_standard_headers() {
        let mapping = infer_mapping(&headers(&[
            "Phone Number",
            "First Name",
            "Last Name",
            "Company",
            "Notes",
        ]));

        assert_eq!(mapping.phone.as_deref(), Some("Phone Number"));
        assert_eq!(mapping.first_name.as_deref(), Some("First Name"));
        assert_eq!(mapping.last_name.as_deref(), Some("Last Name"));
        assert_eq!(mapping.company_name.as_deref(), Some("Company"));
    }

    #[test]
    fn test_first_match_wins() {
        let mapping = infer_mapping(&headers(&["phone", "Phone Number"]));
        assert_eq!(mapping.phone.as_deref(), Some("phone"));
    }

    #[test]
    fn test_exact_match_only() {
        let mapping = infer_mapping(&headers(&["phone_number", "my phone", "firstname2"]));
        assert!(mapping.phone.is_none());
        assert!(mapping.first_name.is_none());
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let mapping = infer_mapping(&headers(&["  PHONE  ", "FiRsT nAmE"]));
        assert_eq!(mapping.phone.as_deref(), Some("  PHONE  "));
        assert_eq!(mapping.first_name.as_deref(), Some("FiRsT nAmE"));
    }

    #[test]
    fn test_no_match_leaves_fields_unmapped() {
        let mapping = infer_mapping(&headers(&["email", "address"]));
        assert_eq!(mapping, FieldMapping::default());
    }
}
