//! Terminal rendering for the review and import commands

use colored::{ColoredString, Colorize};

use crate::import::driver::{ImportReport, LogLevel};
use crate::import::grid::Stats;
use crate::import::record::{RecordStatus, TempleRecord};
use crate::import::validate;

pub fn status_badge(status: RecordStatus) -> ColoredString {
    match status {
        RecordStatus::Valid => "VALID".green(),
        RecordStatus::Warning => "WARNING".yellow(),
        RecordStatus::Error => "ERROR".red(),
    }
}

pub fn print_stats(stats: Stats) {
    println!(
        "{} total | {} valid | {} need review | {} with errors",
        stats.total.to_string().bold(),
        stats.valid.to_string().green(),
        stats.warning.to_string().yellow(),
        stats.error.to_string().red(),
    );
}

/// Fixed-width record table, one line per record
pub fn print_table(records: &[&TempleRecord]) {
    if records.is_empty() {
        println!("{}", "No rows match the current filter.".dimmed());
        return;
    }
    println!(
        "{:>4}  {:<8} {:<32} {:<9} {:<18} {:<6} {:<12} {:>6}",
        "id", "status", "name", "tradition", "city", "state", "phone", "rating"
    );
    for record in records {
        println!(
            "{:>4}  {:<8} {:<32} {:<9} {:<18} {:<6} {:<12} {:>6}",
            record.id,
            status_badge(record.status),
            clip(&record.name, 32),
            record.tradition.as_str(),
            clip(&record.city, 18),
            clip(&record.state, 6),
            clip(&record.phone, 12),
            record
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}

/// Per-row issue lines for every record that is not fully valid
pub fn print_issues(records: &[&TempleRecord]) {
    for record in records {
        let validation = validate::check(record);
        if validation.issues.is_empty() {
            continue;
        }
        let label = if record.name.is_empty() {
            "(unnamed)".to_string()
        } else {
            record.name.clone()
        };
        println!(
            "  row {} {}: {}",
            record.id,
            label,
            validation.issues.join(", ")
        );
    }
}

pub fn print_report(report: &ImportReport) {
    for line in &report.log {
        let rendered = line.to_string();
        match line.level {
            LogLevel::Info => println!("{}", rendered),
            LogLevel::Warn => println!("{}", rendered.yellow()),
            LogLevel::Error => println!("{}", rendered.red()),
        }
    }
    println!();
    println!("{}", report.summary().bold());
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let truncated: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
