//! Core record types for the import working set

use std::fmt;
use std::str::FromStr;

/// Religious tradition assigned to each temple (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tradition {
    Hindu,
    Sikh,
    Jain,
    Buddhist,
}

impl Tradition {
    pub const ALL: [Tradition; 4] = [
        Tradition::Hindu,
        Tradition::Sikh,
        Tradition::Jain,
        Tradition::Buddhist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tradition::Hindu => "Hindu",
            Tradition::Sikh => "Sikh",
            Tradition::Jain => "Jain",
            Tradition::Buddhist => "Buddhist",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tradition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hindu" => Ok(Tradition::Hindu),
            "sikh" => Ok(Tradition::Sikh),
            "jain" => Ok(Tradition::Jain),
            "buddhist" => Ok(Tradition::Buddhist),
            other => Err(format!("Unknown tradition: '{}'", other)),
        }
    }
}

/// Derived review status of a record, always recomputed by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Valid,
    Warning,
    Error,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 3] = [
        RecordStatus::Valid,
        RecordStatus::Warning,
        RecordStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Valid => "valid",
            RecordStatus::Warning => "warning",
            RecordStatus::Error => "error",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "valid" => Ok(RecordStatus::Valid),
            "warning" => Ok(RecordStatus::Warning),
            "error" => Ok(RecordStatus::Error),
            other => Err(format!("Unknown status: '{}'", other)),
        }
    }
}

/// The spreadsheet columns this tool consumes, captured verbatim per row.
///
/// Kept on the record as its provenance anchor; never mutated after parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub name: Option<String>,
    pub category: Option<String>,
    pub type_: Option<String>,
    pub subtypes: Option<String>,
    pub city: Option<String>,
    pub us_state: Option<String>,
    pub phone: Option<String>,
    pub site: Option<String>,
    pub rating: Option<String>,
    pub reviews: Option<String>,
    pub email_1: Option<String>,
    pub full_address: Option<String>,
    pub street: Option<String>,
    pub description: Option<String>,
}

/// One temple in the working set
#[derive(Debug, Clone, PartialEq)]
pub struct TempleRecord {
    /// Unique within the working set; insertion order = display order
    pub id: u64,
    /// The raw parsed row this record came from
    pub raw: RawRow,
    pub name: String,
    pub tradition: Tradition,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    pub address: String,
    pub description: String,
    /// Display-only, not editable in the grid
    pub rating: Option<f64>,
    /// Display-only, not editable in the grid
    pub reviews: Option<i64>,
    pub status: RecordStatus,
}

impl TempleRecord {
    /// A freshly added row with nothing filled in yet
    pub fn blank(id: u64) -> Self {
        Self {
            id,
            raw: RawRow::default(),
            name: String::new(),
            tradition: Tradition::Hindu,
            city: String::new(),
            state: String::new(),
            phone: String::new(),
            website: String::new(),
            email: String::new(),
            address: String::new(),
            description: String::new(),
            rating: None,
            reviews: None,
            status: RecordStatus::Warning,
        }
    }
}
