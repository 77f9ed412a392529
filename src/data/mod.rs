//! Data module - workbook loading and table access

mod loader;
mod processor;
pub mod schema;

pub use loader::{frame_from_rows, LoaderError, ResultsLoader};
pub use processor::{DataProcessor, ProcessorError};
pub use schema::CellValue;
