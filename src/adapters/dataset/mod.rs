//! Dataset Adapters.
//!
//! Loading of user-supplied tables from outside the process.

mod csv_file;

pub use csv_file::CsvFileLoader;
