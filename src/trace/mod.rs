//! Request-log extraction: tokenizing, matching, and whole-file reading.

pub mod lexer;
pub mod reader;
pub mod record;

pub use reader::{ExtractStats, Extraction, TraceError, extract_records, read_trace_file};
pub use record::{LogRecord, SECONDS_PER_DAY, parse_line};
