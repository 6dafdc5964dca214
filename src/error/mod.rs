//! Error types for conversion failures.

mod conversion;
mod report;

pub use conversion::{ConversionError, ConversionErrors};
pub use report::{ErrorReport, SCHEMA_KEY};
