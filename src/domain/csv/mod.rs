// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Value objects for lead file ingestion
// No I/O, no async, no external dependencies beyond serde

mod field_mapping;
mod raw_table;

pub use field_mapping::{FieldMapping, LeadField};
pub use raw_table::RawTable;
