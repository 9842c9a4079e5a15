//! Review grid state
//!
//! Owns the working set of records between parse and import. Every
//! operation is an explicit transition on this state object; nothing here
//! touches the network or the terminal. Filtering never mutates the set,
//! and the derived stats are recomputed after every mutation.

use std::fmt;
use std::str::FromStr;

use super::record::{RecordStatus, TempleRecord, Tradition};
use super::validate;

/// Derived counts over the working set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub valid: usize,
    pub warning: usize,
    pub error: usize,
}

/// The grid columns an operator can edit. Rating and review count are
/// display-only and deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Tradition,
    City,
    State,
    Phone,
    Website,
    Email,
    Address,
    Description,
}

impl EditField {
    pub const ALL: [EditField; 9] = [
        EditField::Name,
        EditField::Tradition,
        EditField::City,
        EditField::State,
        EditField::Phone,
        EditField::Website,
        EditField::Email,
        EditField::Address,
        EditField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditField::Name => "name",
            EditField::Tradition => "tradition",
            EditField::City => "city",
            EditField::State => "state",
            EditField::Phone => "phone",
            EditField::Website => "website",
            EditField::Email => "email",
            EditField::Address => "address",
            EditField::Description => "description",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditField::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown field: '{}'", s))
    }
}

/// Multi-field filter over the working set; empty criteria match everything
#[derive(Debug, Clone, Default)]
pub struct GridFilter {
    /// Case-insensitive substring on the temple name
    pub name: Option<String>,
    pub tradition: Option<Tradition>,
    pub status: Option<RecordStatus>,
    /// Case-insensitive substring on the state
    pub state: Option<String>,
}

impl GridFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tradition.is_none()
            && self.status.is_none()
            && self.state.is_none()
    }

    fn matches(&self, record: &TempleRecord) -> bool {
        let name_ok = match &self.name {
            Some(needle) => record.name.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        };
        let tradition_ok = self.tradition.is_none_or(|t| record.tradition == t);
        let status_ok = self.status.is_none_or(|s| record.status == s);
        let state_ok = match &self.state {
            Some(needle) => record.state.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        };
        name_ok && tradition_ok && status_ok && state_ok
    }
}

/// Authoritative in-memory working set plus its derived stats
#[derive(Debug, Clone, Default)]
pub struct GridState {
    records: Vec<TempleRecord>,
    stats: Stats,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole working set (file upload / re-upload)
    pub fn from_records(records: Vec<TempleRecord>) -> Self {
        let mut grid = Self {
            records,
            stats: Stats::default(),
        };
        grid.recompute_stats();
        grid
    }

    pub fn records(&self) -> &[TempleRecord] {
        &self.records
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&TempleRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Set one field on the record with the given id, re-validate it in
    /// place, and refresh the stats. Returns false (and changes nothing)
    /// when the id is unknown or a tradition value does not parse.
    pub fn edit(&mut self, id: u64, field: EditField, value: &str) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        match field {
            EditField::Name => record.name = value.to_string(),
            EditField::Tradition => match value.parse::<Tradition>() {
                Ok(t) => record.tradition = t,
                Err(_) => return false,
            },
            EditField::City => record.city = value.to_string(),
            EditField::State => record.state = value.to_string(),
            EditField::Phone => record.phone = value.to_string(),
            EditField::Website => record.website = value.to_string(),
            EditField::Email => record.email = value.to_string(),
            EditField::Address => record.address = value.to_string(),
            EditField::Description => record.description = value.to_string(),
        }
        record.status = validate::status_of(record);
        self.recompute_stats();
        true
    }

    /// Remove the record with the given id. Confirmation prompts belong to
    /// the caller; this is the unconditional transition.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.recompute_stats();
        }
        removed
    }

    /// Add an empty record and return its id (max existing id + 1)
    pub fn add_blank(&mut self) -> u64 {
        let id = self
            .records
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(0, |max| max + 1);
        self.records.push(TempleRecord::blank(id));
        self.recompute_stats();
        id
    }

    /// View of the working set matching every set criterion (AND)
    pub fn filter<'a>(&'a self, filter: &GridFilter) -> Vec<&'a TempleRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    fn recompute_stats(&mut self) {
        let mut stats = Stats {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status {
                RecordStatus::Valid => stats.valid += 1,
                RecordStatus::Warning => stats.warning += 1,
                RecordStatus::Error => stats.error += 1,
            }
        }
        self.stats = stats;
    }
}
