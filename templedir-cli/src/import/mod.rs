//! The spreadsheet import pipeline
//!
//! Upload flows through parse -> normalize -> validate into the review
//! grid, where the operator edits records before the driver pushes the
//! non-error ones through the gateway, or the export writes them back out.

pub mod driver;
pub mod excel;
pub mod grid;
pub mod normalize;
pub mod record;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use grid::GridState;
use normalize::normalize_row;

/// Parse a spreadsheet into a fully normalized and validated working set
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<GridState> {
    let rows = excel::read_temple_workbook(path)?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(ordinal, raw)| normalize_row(raw, ordinal as u64))
        .collect();
    Ok(GridState::from_records(records))
}
