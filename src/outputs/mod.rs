/// Console table, summary and JSON output
pub mod console;
