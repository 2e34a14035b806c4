// ============================================================
// LEAD IMPORT USE CASE
// ============================================================
// Turn a parsed table and a field mapping into campaign-ready leads

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::domain::csv::{FieldMapping, LeadField, RawTable};
use crate::domain::error::{AppError, Result};
use crate::domain::lead::{validate_phone, ImportResult, LeadRecord};

/// Build lead records from a parsed table.
///
/// Rows whose mapped phone value is not plain digits after trimming are
/// counted as rejected and skipped; every other row becomes one accepted
/// lead. Unmapped columns are carried verbatim into `personalization`.
pub fn import_leads(table: &RawTable, mapping: &FieldMapping) -> Result<ImportResult> {
    let phone_header = mapping.get(LeadField::Phone).ok_or_else(|| {
        AppError::ConfigurationError("Phone column is not mapped".to_string())
    })?;

    for field in LeadField::ALL {
        if let Some(header) = mapping.get(field) {
            if !table.has_header(header) {
                return Err(AppError::ConfigurationError(format!(
                    "Mapped column not found in file: {}",
                    header
                )));
            }
        }
    }

    let mapped_headers = mapping.mapped_headers();

    // One timestamp for the whole run so the batch is identifiable later.
    let created_at = chrono::Utc::now();

    let mut accepted = Vec::new();
    let mut rejected_count = 0usize;

    for row in &table.rows {
        let phone = row.get(phone_header).map(|v| v.trim()).unwrap_or("");
        if !validate_phone(phone) {
            rejected_count += 1;
            continue;
        }

        accepted.push(LeadRecord {
            phone: phone.to_string(),
            first_name: mapped_value(row, mapping, LeadField::FirstName),
            last_name: mapped_value(row, mapping, LeadField::LastName),
            company_name: mapped_value(row, mapping, LeadField::CompanyName),
            personalization: collect_personalization(table, row, &mapped_headers),
            stop_sending: false,
            created_at,
        });
    }

    Ok(ImportResult {
        accepted,
        rejected_count,
    })
}

fn mapped_value(row: &HashMap<String, String>, mapping: &FieldMapping, field: LeadField) -> String {
    mapping
        .get(field)
        .and_then(|header| row.get(header))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn collect_personalization(
    table: &RawTable,
    row: &HashMap<String, String>,
    mapped_headers: &[&str],
) -> BTreeMap<String, serde_json::Value> {
    let mut personalization = BTreeMap::new();

    for header in &table.headers {
        if mapped_headers.contains(&header.as_str()) {
            continue;
        }
        if let Some(value) = row.get(header) {
            personalization.insert(
                header.clone(),
                serde_json::Value::String(value.clone()),
            );
        }
    }

    personalization
}

// ============================================================
// TESTS
// ============================================================
