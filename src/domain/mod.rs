pub mod campaign;
pub mod error;
pub mod lead;
pub mod schedule;

// CSV ingestion module
pub mod csv;
