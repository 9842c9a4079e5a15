//! Write the working set back to a spreadsheet for offline correction

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::import::record::TempleRecord;

const SHEET_NAME: &str = "Corrected Temples";

/// Exported columns, business fields plus the derived status
const COLUMNS: [&str; 12] = [
    "name",
    "tradition",
    "city",
    "state",
    "phone",
    "website",
    "email",
    "address",
    "description",
    "rating",
    "reviews",
    "status",
];

/// Write one worksheet with every record in working-set order
pub fn write_corrected_workbook(records: &[TempleRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        write_record(worksheet, (row_idx + 1) as u32, record)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save spreadsheet: {}", path.display()))?;
    Ok(())
}

fn write_record(ws: &mut Worksheet, row: u32, record: &TempleRecord) -> Result<()> {
    ws.write_string(row, 0, &record.name)?;
    ws.write_string(row, 1, record.tradition.as_str())?;
    ws.write_string(row, 2, &record.city)?;
    ws.write_string(row, 3, &record.state)?;
    ws.write_string(row, 4, &record.phone)?;
    ws.write_string(row, 5, &record.website)?;
    ws.write_string(row, 6, &record.email)?;
    ws.write_string(row, 7, &record.address)?;
    ws.write_string(row, 8, &record.description)?;
    if let Some(rating) = record.rating {
        ws.write_number(row, 9, rating)?;
    }
    if let Some(reviews) = record.reviews {
        ws.write_number(row, 10, reviews as f64)?;
    }
    ws.write_string(row, 11, record.status.as_str())?;
    Ok(())
}
