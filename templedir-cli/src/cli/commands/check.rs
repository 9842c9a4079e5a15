//! Offline parse-and-validate pass over a spreadsheet

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::display;
use crate::import;
use crate::import::record::RecordStatus;

pub fn handle_check(file: &Path) -> Result<()> {
    let grid = import::load_workbook(file)?;
    let stats = grid.stats();

    println!("Parsed {}", file.display());
    display::print_stats(stats);

    let flagged: Vec<_> = grid
        .records()
        .iter()
        .filter(|r| r.status != RecordStatus::Valid)
        .collect();
    if !flagged.is_empty() {
        println!();
        println!("{}", "Rows needing attention:".bold());
        display::print_issues(&flagged);
    }

    if stats.error > 0 {
        println!();
        println!(
            "{}",
            format!(
                "{} row(s) would be skipped by an import until a name is filled in.",
                stats.error
            )
            .red()
        );
    }
    Ok(())
}
