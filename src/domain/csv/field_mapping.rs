use serde::{Deserialize, Serialize};

/// The four lead columns a CSV header can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadField {
    Phone,
    FirstName,
    LastName,
    CompanyName,
}

impl LeadField {
    pub const ALL: [LeadField; 4] = [
        LeadField::Phone,
        LeadField::FirstName,
        LeadField::LastName,
        LeadField::CompanyName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Phone => "phone",
            LeadField::FirstName => "first_name",
            LeadField::LastName => "last_name",
            LeadField::CompanyName => "company_name",
        }
    }
}

/// Which header feeds each lead column. `None` means unmapped; unmapped
/// columns default to empty strings at import time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

impl FieldMapping {
    pub fn get(&self, field: LeadField) -> Option<&str> {
        match field {
            LeadField::Phone => self.phone.as_deref(),
            LeadField::FirstName => self.first_name.as_deref(),
            LeadField::LastName => self.last_name.as_deref(),
            LeadField::CompanyName => self.company_name.as_deref(),
        }
    }

    /// Assign a header to a lead column. An empty or whitespace-only header
    /// clears the assignment instead.
    pub fn set(&mut self, field: LeadField, header: Option<String>) {
        let header = header.filter(|h| !h.trim().is_empty());
        match field {
            LeadField::Phone => self.phone = header,
            LeadField::FirstName => self.first_name = header,
            LeadField::LastName => self.last_name = header,
            LeadField::CompanyName => self.company_name = header,
        }
    }

    /// Header names currently consumed by a lead column.
    pub fn mapped_headers(&self) -> Vec<&str> {
        LeadField::ALL
            .iter()
            .filter_map(|field| self.get(*field))
            .collect()
    }
}
