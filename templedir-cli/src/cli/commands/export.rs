//! Round-trip export for offline correction

use std::path::Path;

use anyhow::Result;

use crate::cli::display;
use crate::import;
use crate::import::excel::write_corrected_workbook;

pub fn handle_export(file: &Path, output: &Path) -> Result<()> {
    let grid = import::load_workbook(file)?;
    write_corrected_workbook(grid.records(), output)?;

    display::print_stats(grid.stats());
    println!(
        "Wrote {} record(s) to {}",
        grid.records().len(),
        output.display()
    );
    Ok(())
}
