//! Interactive review loop
//!
//! Terminal counterpart of the original review grid: show the (filtered)
//! table, edit any field by row id, delete with confirmation, add blank
//! rows, adjust filters, export, or hand the working set to the import
//! driver.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::api::SupabaseGateway;
use crate::cli::display;
use crate::config::Config;
use crate::import;
use crate::import::driver::{ImportOptions, run_import};
use crate::import::grid::{EditField, GridFilter, GridState};
use crate::import::record::{RecordStatus, Tradition};
use crate::import::validate;

const ACTIONS: [&str; 9] = [
    "Show table",
    "Edit a field",
    "Delete a row",
    "Add a row",
    "Set filters",
    "Clear filters",
    "Export corrected data",
    "Import to database",
    "Quit",
];

pub async fn handle_review(
    file: &Path,
    name: Option<String>,
    tradition: Option<String>,
    status: Option<String>,
    state: Option<String>,
) -> Result<()> {
    let mut grid = import::load_workbook(file)?;
    let mut filter = build_filter(name, tradition, status, state)?;

    println!("Loaded {}", file.display());
    display::print_stats(grid.stats());
    display::print_table(&grid.filter(&filter));

    loop {
        println!();
        let action = Select::new()
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => {
                display::print_stats(grid.stats());
                display::print_table(&grid.filter(&filter));
                if !filter.is_empty() {
                    println!("{}", "(filtered view; import always uses all rows)".dimmed());
                }
            }
            1 => edit_field(&mut grid)?,
            2 => delete_row(&mut grid)?,
            3 => add_row(&mut grid)?,
            4 => filter = prompt_filter()?,
            5 => {
                filter = GridFilter::default();
                println!("Filters cleared.");
            }
            6 => export(&grid)?,
            7 => import_all(&grid).await?,
            _ => break,
        }
    }
    Ok(())
}

fn build_filter(
    name: Option<String>,
    tradition: Option<String>,
    status: Option<String>,
    state: Option<String>,
) -> Result<GridFilter> {
    let tradition = tradition
        .map(|t| t.parse::<Tradition>().map_err(anyhow::Error::msg))
        .transpose()
        .context("Invalid --tradition filter")?;
    let status = status
        .map(|s| s.parse::<RecordStatus>().map_err(anyhow::Error::msg))
        .transpose()
        .context("Invalid --status filter")?;
    Ok(GridFilter {
        name: name.filter(|s| !s.is_empty()),
        tradition,
        status,
        state: state.filter(|s| !s.is_empty()),
    })
}

fn prompt_row_id(grid: &GridState, prompt: &str) -> Result<Option<u64>> {
    let id: u64 = Input::new().with_prompt(prompt).interact_text()?;
    if grid.get(id).is_none() {
        println!("No row with id {}.", id);
        return Ok(None);
    }
    Ok(Some(id))
}

fn edit_field(grid: &mut GridState) -> Result<()> {
    let Some(id) = prompt_row_id(grid, "Row id")? else {
        return Ok(());
    };

    let field_idx = Select::new()
        .with_prompt("Field")
        .items(&EditField::ALL)
        .default(0)
        .interact()?;
    let field = EditField::ALL[field_idx];

    let value = if field == EditField::Tradition {
        let pick = Select::new()
            .with_prompt("Tradition")
            .items(&Tradition::ALL)
            .default(0)
            .interact()?;
        Tradition::ALL[pick].as_str().to_string()
    } else {
        Input::<String>::new()
            .with_prompt(format!("New value for {}", field))
            .allow_empty(true)
            .interact_text()?
    };

    grid.edit(id, field, &value);
    report_row(grid, id);
    Ok(())
}

fn delete_row(grid: &mut GridState) -> Result<()> {
    let Some(id) = prompt_row_id(grid, "Row id to delete")? else {
        return Ok(());
    };
    let name = grid.get(id).map(|r| r.name.clone()).unwrap_or_default();
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete row {} ('{}')?", id, name))
        .default(false)
        .interact()?;
    if confirmed && grid.delete(id) {
        println!("Deleted row {}.", id);
        display::print_stats(grid.stats());
    }
    Ok(())
}

/// Add a blank row and immediately open it for detailed editing
fn add_row(grid: &mut GridState) -> Result<()> {
    let id = grid.add_blank();
    println!("Added row {}.", id);

    for field in [
        EditField::Name,
        EditField::City,
        EditField::State,
        EditField::Phone,
        EditField::Website,
    ] {
        let value: String = Input::new()
            .with_prompt(field.to_string())
            .allow_empty(true)
            .interact_text()?;
        if !value.is_empty() {
            grid.edit(id, field, &value);
        }
    }
    let pick = Select::new()
        .with_prompt("Tradition")
        .items(&Tradition::ALL)
        .default(0)
        .interact()?;
    grid.edit(id, EditField::Tradition, Tradition::ALL[pick].as_str());

    report_row(grid, id);
    display::print_stats(grid.stats());
    Ok(())
}

fn report_row(grid: &GridState, id: u64) {
    if let Some(record) = grid.get(id) {
        let validation = validate::check(record);
        print!("Row {} is now {}", id, display::status_badge(record.status));
        if validation.issues.is_empty() {
            println!(".");
        } else {
            println!(": {}", validation.issues.join(", "));
        }
    }
}

fn prompt_filter() -> Result<GridFilter> {
    let name: String = Input::new()
        .with_prompt("Name contains (empty for all)")
        .allow_empty(true)
        .interact_text()?;
    let traditions = ["All", "Hindu", "Sikh", "Jain", "Buddhist"];
    let tradition_pick = Select::new()
        .with_prompt("Tradition")
        .items(&traditions)
        .default(0)
        .interact()?;
    let statuses = ["All", "valid", "warning", "error"];
    let status_pick = Select::new()
        .with_prompt("Status")
        .items(&statuses)
        .default(0)
        .interact()?;
    let state: String = Input::new()
        .with_prompt("State contains (empty for all)")
        .allow_empty(true)
        .interact_text()?;

    Ok(GridFilter {
        name: (!name.is_empty()).then_some(name),
        tradition: (tradition_pick > 0)
            .then(|| traditions[tradition_pick].parse::<Tradition>().ok())
            .flatten(),
        status: (status_pick > 0)
            .then(|| statuses[status_pick].parse::<RecordStatus>().ok())
            .flatten(),
        state: (!state.is_empty()).then_some(state),
    })
}

fn export(grid: &GridState) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Output file")
        .with_initial_text("corrected-temples.xlsx")
        .interact_text()?;
    import::excel::write_corrected_workbook(grid.records(), &PathBuf::from(&path))?;
    println!("Wrote {} record(s) to {}.", grid.records().len(), path);
    Ok(())
}

async fn import_all(grid: &GridState) -> Result<()> {
    let stats = grid.stats();
    let importable = stats.total - stats.error;
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Import {} row(s) ({} error row(s) will be skipped)?",
            importable, stats.error
        ))
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let config = Config::load()?;
    let gateway = SupabaseGateway::new(&config);
    let report = run_import(&gateway, grid.records(), &ImportOptions::default()).await;
    display::print_report(&report);
    Ok(())
}
