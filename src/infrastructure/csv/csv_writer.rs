// ============================================================
// CSV WRITER
// ============================================================
// Serialize stored leads back to delimited text for download

use std::collections::BTreeSet;
use std::path::Path;

use csv::WriterBuilder;

use crate::domain::error::{AppError, Result};
use crate::domain::lead::Lead;

/// Writes leads out with the standard columns first, then every
/// personalization key seen across the batch in sorted order.
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Render leads as CSV text with CRLF line endings.
    pub fn write_leads(&self, leads: &[Lead]) -> Result<String> {
        let extra_columns: BTreeSet<&str> = leads
            .iter()
            .flat_map(|lead| lead.record.personalization.keys())
            .map(String::as_str)
            .collect();

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        let mut header: Vec<&str> = vec![
            "phone",
            "first_name",
            "last_name",
            "company_name",
            "created_at",
            "stop_sending",
        ];
        header.extend(extra_columns.iter().copied());
        writer
            .write_record(&header)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

        for lead in leads {
            let mut fields: Vec<String> = vec![
                lead.record.phone.clone(),
                lead.record.first_name.clone(),
                lead.record.last_name.clone(),
                lead.record.company_name.clone(),
                lead.record.created_at.to_rfc3339(),
                lead.record.stop_sending.to_string(),
            ];
            for column in &extra_columns {
                let value = lead
                    .record
                    .personalization
                    .get(*column)
                    .map(render_value)
                    .unwrap_or_default();
                fields.push(value);
            }
            writer
                .write_record(&fields)
                .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("CSV output is not UTF-8: {}", e)))
    }

    /// Render leads and write the result to a file.
    pub fn write_leads_to_file(&self, path: &Path, leads: &[Lead]) -> Result<()> {
        let content = self.write_leads(leads)?;
        std::fs::write(path, content)
            .map_err(|e| AppError::IoError(format!("Failed to write file: {}", e)))
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::LeadRecord;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn lead_with(phone: &str, extras: &[(&str, &str)]) -> Lead {
        let mut personalization = BTreeMap::new();
        for (key, value) in extras {
            personalization.insert(
                key.to_string(),
                serde_json::Value::String(value.to_string()),
            );
        }
        Lead {
            id: 1,
            campaign_id: "c1".to_string(),
            record: LeadRecord {
                phone: phone.to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                company_name: String::new(),
                personalization,
                stop_sending: false,
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_extra_columns_are_sorted_union() {
        let leads = vec![
            lead_with("111", &[("zebra", "z"), ("apple", "a")]),
            lead_with("222", &[("mango", "m")]),
        ];
        let output = CsvWriter::new().write_leads(&leads).unwrap();
        let header = output.lines().next().unwrap();

        assert_eq!(
            header,
            "phone,first_name,last_name,company_name,created_at,stop_sending,apple,mango,zebra"
        );
    }

    #[test]
    fn test_missing_key_renders_empty_cell() {
        let leads = vec![
            lead_with("111", &[("note", "hi")]),
            lead_with("222", &[]),
        ];
        let output = CsvWriter::new().write_leads(&leads).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[1].ends_with(",false,hi"));
        assert!(lines[2].ends_with(",false,"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let leads = vec![lead_with("111", &[])];
        let output = CsvWriter::new().write_leads(&leads).unwrap();

        assert!(output.contains("\r\n"));
    }

    #[test]
    fn test_exported_leads_import_back() {
        use crate::application::import_leads;
        use crate::domain::csv::{FieldMapping, LeadField};
        use crate::infrastructure::csv::CsvParser;

        let leads = vec![
            lead_with("15551234567", &[("note", "vip"), ("city", "Oslo")]),
            lead_with("15559876543", &[("note", "follow up")]),
        ];
        let output = CsvWriter::new().write_leads(&leads).unwrap();

        let table = CsvParser::new().parse_content(&output).unwrap();
        let mut mapping = FieldMapping::default();
        for field in LeadField::ALL {
            mapping.set(field, Some(field.label().to_string()));
        }
        let result = import_leads(&table, &mapping).unwrap();

        assert_eq!(result.accepted.len(), leads.len());
        assert_eq!(result.rejected_count, 0);
        for (reimported, original) in result.accepted.iter().zip(&leads) {
            assert_eq!(reimported.phone, original.record.phone);
            assert_eq!(reimported.first_name, original.record.first_name);
            assert_eq!(reimported.last_name, original.record.last_name);
            assert_eq!(reimported.company_name, original.record.company_name);
            for (key, value) in &original.record.personalization {
                assert_eq!(reimported.personalization.get(key), Some(value));
            }
        }
    }
}
