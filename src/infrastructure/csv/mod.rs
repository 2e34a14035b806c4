// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing, encoding detection, and lead export

mod csv_parser;
mod csv_writer;
mod decode;

pub use csv_parser::CsvParser;
pub use csv_writer::CsvWriter;
pub use decode::decode_bytes;
