//! Sequential bulk-import driver
//!
//! Pushes every non-error record through the gateway, one record fully
//! completed before the next begins: tradition lookup, optional state
//! lookup, insert. Failures are logged, counted, and skipped past; nothing
//! is retried or rolled back. The run log is an append-only structure the
//! presentation layer renders; the driver itself never prints.

use std::fmt;
use std::time::Duration;

use crate::api::{Gateway, NewTemple};

use super::record::{RecordStatus, TempleRecord};

/// How many failure messages the summary prints before truncating
pub const SUMMARY_FAILURE_CAP: usize = 5;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Pause between records so the hosted database is not hammered;
    /// zero disables the pause (tests run with zero)
    pub delay: Duration,
    /// Walk the full pipeline but skip every network call
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One line of the user-facing run log
#[derive(Debug, Clone)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            LogLevel::Info => "ok",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Outcome of one import run
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Records that reached the gateway (error rows are not attempted)
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub log: Vec<LogLine>,
    /// One message per failed record, in run order
    pub failures: Vec<String>,
}

impl ImportReport {
    fn push(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Warn => log::warn!("{}", message),
            LogLevel::Error => log::error!("{}", message),
        }
        self.log.push(LogLine { level, message });
    }

    /// Aggregate totals plus a capped list of failure reasons
    pub fn summary(&self) -> String {
        let rate = if self.attempted == 0 {
            100.0
        } else {
            self.succeeded as f64 * 100.0 / self.attempted as f64
        };
        let mut out = format!(
            "Import complete: {} attempted, {} succeeded, {} failed ({:.1}% success)",
            self.attempted, self.succeeded, self.failed, rate
        );
        for failure in self.failures.iter().take(SUMMARY_FAILURE_CAP) {
            out.push_str(&format!("\n  - {}", failure));
        }
        if self.failures.len() > SUMMARY_FAILURE_CAP {
            out.push_str(&format!(
                "\n  ...and {} more",
                self.failures.len() - SUMMARY_FAILURE_CAP
            ));
        }
        out
    }
}

/// Run the import over the full working set, in display order. Filters
/// never restrict this input; error-status rows are skipped without a
/// network call.
pub async fn run_import(
    gateway: &dyn Gateway,
    records: &[TempleRecord],
    options: &ImportOptions,
) -> ImportReport {
    let mut report = ImportReport::default();

    for record in records {
        if record.status == RecordStatus::Error {
            report.push(
                LogLevel::Warn,
                format!("row {}: skipped, failed validation", record.id),
            );
            continue;
        }

        report.attempted += 1;
        import_one(gateway, record, options, &mut report).await;

        if !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    report
}

async fn import_one(
    gateway: &dyn Gateway,
    record: &TempleRecord,
    options: &ImportOptions,
    report: &mut ImportReport,
) {
    if options.dry_run {
        report.succeeded += 1;
        report.push(
            LogLevel::Info,
            format!(
                "row {}: would import '{}' ({}, {} {})",
                record.id, record.name, record.tradition, record.city, record.state
            ),
        );
        return;
    }

    // Tradition lookup failure is fatal for this record
    let tradition_id = match gateway.resolve_tradition(record.tradition.as_str()).await {
        Ok(id) => id,
        Err(e) => {
            let message = format!("row {} '{}': tradition lookup failed: {}", record.id, record.name, e);
            report.failed += 1;
            report.failures.push(message.clone());
            report.push(LogLevel::Error, message);
            return;
        }
    };

    // State lookup failure is not: the record proceeds without a state
    let state_id = if record.state.is_empty() {
        None
    } else {
        match gateway.resolve_state(&record.state).await {
            Ok(id) => Some(id),
            Err(e) => {
                report.push(
                    LogLevel::Warn,
                    format!(
                        "row {} '{}': state lookup failed, importing without state: {}",
                        record.id, record.name, e
                    ),
                );
                None
            }
        }
    };

    let temple = NewTemple {
        name: record.name.clone(),
        tradition_id,
        city: record.city.clone(),
        state_id,
        phone: non_empty(&record.phone),
        email: non_empty(&record.email),
        website_url: non_empty(&record.website),
        address_line1: non_empty(&record.address),
        description: non_empty(&record.description),
        rating: record.rating,
        review_count: record.reviews,
    };

    match gateway.insert_temple(temple).await {
        Ok(stored) => {
            report.succeeded += 1;
            report.push(
                LogLevel::Info,
                format!("row {}: imported '{}' as /{}", record.id, stored.name, stored.slug),
            );
        }
        Err(e) => {
            let message = format!("row {} '{}': insert failed: {}", record.id, record.name, e);
            report.failed += 1;
            report.failures.push(message.clone());
            report.push(LogLevel::Error, message);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GatewayError, StoredTemple};
    use crate::import::record::Tradition;
    use crate::import::validate;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory gateway standing in for the hosted database
    #[derive(Default)]
    struct FakeGateway {
        /// Tradition names that resolve; everything else is NotFound
        known_traditions: Vec<&'static str>,
        /// State lookups fail when true
        fail_states: bool,
        /// (name, city) pairs that already exist
        existing: Vec<(String, String)>,
        inserted: Mutex<Vec<NewTemple>>,
        lookups: Mutex<usize>,
    }

    #[async_trait]
    impl Gateway for FakeGateway {
        async fn resolve_tradition(&self, name: &str) -> Result<String, GatewayError> {
            *self.lookups.lock().unwrap() += 1;
            if self.known_traditions.iter().any(|t| t.eq_ignore_ascii_case(name)) {
                Ok(format!("tradition-{}", name.to_lowercase()))
            } else {
                Err(GatewayError::NotFound(format!("Tradition '{}' not found", name)))
            }
        }

        async fn resolve_state(&self, name_or_abbr: &str) -> Result<String, GatewayError> {
            if self.fail_states {
                Err(GatewayError::NotFound(format!("State '{}' not found", name_or_abbr)))
            } else {
                Ok(format!("state-{}", name_or_abbr.to_lowercase()))
            }
        }

        async fn insert_temple(&self, temple: NewTemple) -> Result<StoredTemple, GatewayError> {
            if self
                .existing
                .iter()
                .any(|(n, c)| *n == temple.name && *c == temple.city)
            {
                return Err(GatewayError::Conflict {
                    message: format!("Temple '{}' already exists in {}", temple.name, temple.city),
                    suggestion: None,
                });
            }
            let slug = crate::api::slug::slugify(&temple.name);
            let name = temple.name.clone();
            self.inserted.lock().unwrap().push(temple);
            Ok(StoredTemple {
                id: "1".to_string(),
                name,
                slug,
            })
        }
    }

    fn record(id: u64, name: &str, city: &str, state: &str) -> TempleRecord {
        let mut r = TempleRecord::blank(id);
        r.name = name.to_string();
        r.tradition = Tradition::Hindu;
        r.city = city.to_string();
        r.state = state.to_string();
        r.status = validate::status_of(&r);
        r
    }

    fn no_delay() -> ImportOptions {
        ImportOptions {
            delay: Duration::ZERO,
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn test_error_rows_never_reach_the_gateway() {
        let gateway = FakeGateway {
            known_traditions: vec!["Hindu"],
            ..Default::default()
        };
        let records = vec![
            record(0, "Temple A", "Fremont", "CA"),
            record(1, "Temple B", "Edison", "NJ"),
            record(2, "", "Austin", "TX"), // error: no name
            record(3, "Temple C", "Tampa", "FL"),
        ];

        let report = run_import(&gateway, &records, &no_delay()).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded + report.failed, 3);
        assert_eq!(report.succeeded, 3);
        // One tradition lookup per attempted record, none for the error row
        assert_eq!(*gateway.lookups.lock().unwrap(), 3);
        assert_eq!(gateway.inserted.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_tradition_failure_is_fatal_per_record() {
        let gateway = FakeGateway::default(); // knows no traditions
        let records = vec![record(0, "Temple A", "Fremont", "CA")];

        let report = run_import(&gateway, &records, &no_delay()).await;

        assert_eq!(report.attempted, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 0);
        assert!(gateway.inserted.lock().unwrap().is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("tradition lookup failed"));
    }

    #[tokio::test]
    async fn test_state_failure_proceeds_without_state() {
        let gateway = FakeGateway {
            known_traditions: vec!["Hindu"],
            fail_states: true,
            ..Default::default()
        };
        let records = vec![record(0, "Temple A", "Fremont", "CA")];

        let report = run_import(&gateway, &records, &no_delay()).await;

        assert_eq!(report.succeeded, 1);
        let inserted = gateway.inserted.lock().unwrap();
        assert_eq!(inserted[0].state_id, None);
        assert!(report
            .log
            .iter()
            .any(|l| l.level == LogLevel::Warn && l.message.contains("state lookup failed")));
    }

    #[tokio::test]
    async fn test_empty_state_skips_the_lookup() {
        let gateway = FakeGateway {
            known_traditions: vec!["Hindu"],
            fail_states: true, // would fail if called
            ..Default::default()
        };
        let mut r = record(0, "Temple A", "Fremont", "");
        r.status = validate::status_of(&r); // warning, still importable

        let report = run_import(&gateway, &[r], &no_delay()).await;
        assert_eq!(report.succeeded, 1);
    }

    #[tokio::test]
    async fn test_conflict_is_counted_and_run_continues() {
        let gateway = FakeGateway {
            known_traditions: vec!["Hindu"],
            existing: vec![("Temple A".to_string(), "Fremont".to_string())],
            ..Default::default()
        };
        let records = vec![
            record(0, "Temple A", "Fremont", "CA"),
            record(1, "Temple B", "Edison", "NJ"),
        ];

        let report = run_import(&gateway, &records, &no_delay()).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 1);
        assert!(report.failures[0].contains("already exists"));
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_network_calls() {
        let gateway = FakeGateway::default();
        let records = vec![record(0, "Temple A", "Fremont", "CA")];
        let options = ImportOptions {
            delay: Duration::ZERO,
            dry_run: true,
        };

        let report = run_import(&gateway, &records, &options).await;

        assert_eq!(report.succeeded, 1);
        assert_eq!(*gateway.lookups.lock().unwrap(), 0);
        assert!(gateway.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_caps_failure_list() {
        let gateway = FakeGateway::default(); // every record fails
        let records: Vec<TempleRecord> = (0..8)
            .map(|i| record(i, &format!("Temple {}", i), "Fremont", "CA"))
            .collect();

        let report = run_import(&gateway, &records, &no_delay()).await;
        let summary = report.summary();

        assert!(summary.contains("8 attempted"));
        assert!(summary.contains("0 succeeded"));
        assert!(summary.contains("8 failed"));
        assert!(summary.contains("...and 3 more"));
        // Exactly the cap is listed
        assert_eq!(summary.matches("\n  - ").count(), SUMMARY_FAILURE_CAP);
    }

    #[test]
    fn test_summary_with_nothing_attempted() {
        let report = ImportReport::default();
        assert!(report.summary().contains("0 attempted"));
    }
}
