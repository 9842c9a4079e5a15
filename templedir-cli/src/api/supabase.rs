//! PostgREST gateway implementation
//!
//! Talks to the hosted Supabase database with the service-role key. All
//! three operations are plain REST calls against the `traditions`,
//! `us_states`, and `temples` tables.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::gateway::{Gateway, GatewayError, NewTemple, StoredTemple};
use super::slug::{dedupe_slug, slugify};
use crate::config::Config;

/// Fallback slug base for names that reduce to nothing
const SLUG_FALLBACK: &str = "temple";

pub struct SupabaseGateway {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// The full row sent to the temples table: business fields plus the
/// generated slug, timestamps, and lifecycle defaults.
#[derive(Debug, Serialize)]
struct TempleRow {
    #[serde(flatten)]
    temple: NewTemple,
    slug: String,
    created_at: String,
    updated_at: String,
    verification_status: &'static str,
    status: &'static str,
}

impl SupabaseGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// GET rows from a table with PostgREST filter parameters
    async fn select(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Value>, GatewayError> {
        let response = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(params)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "Query on '{}' failed with {}: {}",
                table, status, body
            )));
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    /// Slugs already present that share this base
    async fn taken_slugs(&self, base: &str) -> Result<HashSet<String>, GatewayError> {
        let rows = self
            .select(
                "temples",
                &[
                    ("select", "slug".to_string()),
                    ("slug", format!("like.{}*", base)),
                ],
            )
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("slug").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}

/// Extract an `id` column regardless of whether the table uses uuid
/// strings or integer keys
fn id_of(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl Gateway for SupabaseGateway {
    async fn resolve_tradition(&self, name: &str) -> Result<String, GatewayError> {
        let rows = self
            .select(
                "traditions",
                &[
                    ("select", "id".to_string()),
                    ("name", format!("ilike.{}", name.trim())),
                ],
            )
            .await?;

        // An ambiguous match is classified the same as no match; the
        // message keeps the two cases distinguishable in the run log.
        match rows.len() {
            1 => id_of(&rows[0])
                .ok_or_else(|| GatewayError::Transport("Tradition row without id".to_string())),
            0 => Err(GatewayError::NotFound(format!(
                "Tradition '{}' not found",
                name
            ))),
            n => Err(GatewayError::NotFound(format!(
                "Tradition '{}' matched {} rows, expected exactly one",
                name, n
            ))),
        }
    }

    async fn resolve_state(&self, name_or_abbr: &str) -> Result<String, GatewayError> {
        let needle = name_or_abbr.trim();

        // Abbreviation first, the common case in US data
        let rows = self
            .select(
                "us_states",
                &[
                    ("select", "id".to_string()),
                    ("abbreviation", format!("ilike.{}", needle)),
                ],
            )
            .await?;
        if rows.len() == 1
            && let Some(id) = id_of(&rows[0])
        {
            return Ok(id);
        }

        let rows = self
            .select(
                "us_states",
                &[
                    ("select", "id".to_string()),
                    ("name", format!("ilike.{}", needle)),
                ],
            )
            .await?;
        if rows.len() == 1
            && let Some(id) = id_of(&rows[0])
        {
            return Ok(id);
        }

        Err(GatewayError::NotFound(format!(
            "State '{}' not found",
            name_or_abbr
        )))
    }

    async fn insert_temple(&self, temple: NewTemple) -> Result<StoredTemple, GatewayError> {
        if temple.name.is_empty() || temple.tradition_id.is_empty() {
            return Err(GatewayError::Invalid(
                "Temple name and tradition are required".to_string(),
            ));
        }

        // Duplicate pre-check on the (name, city, state) triple. Racy by
        // nature; the unique constraints on insert are the real backstop.
        let mut params = vec![
            ("select", "id".to_string()),
            ("name", format!("eq.{}", temple.name)),
            ("city", format!("eq.{}", temple.city)),
        ];
        if let Some(state_id) = &temple.state_id {
            params.push(("state_id", format!("eq.{}", state_id)));
        }
        let existing = self.select("temples", &params).await?;
        if !existing.is_empty() {
            let city = if temple.city.is_empty() {
                "this city"
            } else {
                temple.city.as_str()
            };
            return Err(GatewayError::Conflict {
                message: format!("Temple '{}' already exists in {}", temple.name, city),
                suggestion: Some("edit the name or city if this is a different temple".to_string()),
            });
        }

        let base = {
            let s = slugify(&temple.name);
            if s.is_empty() { SLUG_FALLBACK.to_string() } else { s }
        };
        let slug = dedupe_slug(&base, &self.taken_slugs(&base).await?);

        let now = Utc::now().to_rfc3339();
        let row = TempleRow {
            temple,
            slug,
            created_at: now.clone(),
            updated_at: now,
            verification_status: "unverified",
            status: "active",
        };

        let response = self
            .http
            .post(self.table_url("temples"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::CONFLICT {
            let suggestion = if body.contains("slug") {
                Some("a temple with this slug already exists".to_string())
            } else {
                Some("a temple with this name already exists".to_string())
            };
            return Err(GatewayError::Conflict {
                message: postgrest_message(&body),
                suggestion,
            });
        }
        if !status.is_success() {
            return Err(GatewayError::Transport(format!(
                "Insert failed with {}: {}",
                status,
                postgrest_message(&body)
            )));
        }

        // return=representation yields an array with the stored row
        let mut stored: Vec<StoredTemple> = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Transport(format!("Unexpected insert response: {}", e)))?;
        stored
            .pop()
            .ok_or_else(|| GatewayError::Transport("Insert returned no row".to_string()))
    }
}

/// Pull the `message` field out of a PostgREST error body, falling back to
/// the raw text
fn postgrest_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgrest_message_extraction() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"temples_slug_key\""}"#;
        assert!(postgrest_message(body).contains("temples_slug_key"));
        assert_eq!(postgrest_message("plain text"), "plain text");
    }

    #[test]
    fn test_id_of_handles_uuid_and_integer_keys() {
        let uuid = serde_json::json!({"id": "9b2f"});
        assert_eq!(id_of(&uuid), Some("9b2f".to_string()));
        let int = serde_json::json!({"id": 42});
        assert_eq!(id_of(&int), Some("42".to_string()));
        let missing = serde_json::json!({"name": "x"});
        assert_eq!(id_of(&missing), None);
    }
}
