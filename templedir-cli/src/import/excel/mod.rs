//! Spreadsheet I/O for the import pipeline

pub mod reader;
pub mod writer;

pub use reader::read_temple_workbook;
pub use writer::write_corrected_workbook;
