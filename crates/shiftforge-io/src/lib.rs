//! shiftforge IO - loaders, exporters and sample data.
//!
//! Everything here converts between the domain records and files:
//! - [`CsvLoader`] reads workers, shift types, availability and requests
//! - [`write_schedule_json`] / [`read_schedule_json`] round-trip the
//!   schedule document
//! - [`ExcelExporter`] renders the three-sheet workbook
//! - [`SampleGenerator`] fabricates consistent demo datasets

pub mod csv_loader;
pub mod excel;
pub mod json;
pub mod sample;

pub use csv_loader::{CsvError, CsvLoader};
pub use excel::{ExcelError, ExcelExporter};
pub use json::{read_schedule_json, schedule_to_json_string, write_schedule_json, JsonError};
pub use sample::{Industry, SampleError, SampleFiles, SampleGenerator};
