//! Lookup/insert gateway contract
//!
//! The import driver depends on this trait, not on the HTTP client, so the
//! driver's behavior is testable without a database.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Classified failure of a gateway operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Lookup produced no usable match (zero rows, or ambiguous multiple)
    NotFound(String),
    /// Duplicate temple or unique-constraint violation on insert
    Conflict {
        message: String,
        suggestion: Option<String>,
    },
    /// Request rejected before any network call (missing name/tradition)
    Invalid(String),
    /// Network or database failure of any other kind, surfaced verbatim
    Transport(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::NotFound(msg) => write!(f, "{}", msg),
            GatewayError::Conflict { message, suggestion } => {
                if let Some(hint) = suggestion {
                    write!(f, "{} ({})", message, hint)
                } else {
                    write!(f, "{}", message)
                }
            }
            GatewayError::Invalid(msg) => write!(f, "{}", msg),
            GatewayError::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Business fields for one temple insert; slug, timestamps, and lifecycle
/// defaults are filled in behind the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewTemple {
    pub name: String,
    pub tradition_id: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
}

/// The stored row as returned by the database after insert
#[derive(Debug, Clone, Deserialize)]
pub struct StoredTemple {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// The three operations the import driver performs against the database
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Exact (case-insensitive) tradition name to its database id
    async fn resolve_tradition(&self, name: &str) -> Result<String, GatewayError>;

    /// State abbreviation first, full name as fallback, to its database id
    async fn resolve_state(&self, name_or_abbr: &str) -> Result<String, GatewayError>;

    /// Insert one temple, generating a collision-free slug
    async fn insert_temple(&self, temple: NewTemple) -> Result<StoredTemple, GatewayError>;
}
