use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// One processed utility-bill upload: the raw bytes, the fields the model
/// extracted, and the emission computed from them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bill {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub bill_data: Vec<u8>,
    /// Model output persisted exactly as returned (no schema validation).
    pub extracted: Json<Value>,
    /// Fixed-point kg CO2 string, e.g. "205.00". Nullable for storage-shape
    /// compatibility; rows written by this service always carry it.
    pub carbon_emitted: Option<String>,
    /// Set when unitsConsumed was missing or non-numeric and the emission
    /// defaulted to zero.
    pub needs_review: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(
        file_name: String,
        file_type: String,
        bill_data: Vec<u8>,
        extracted: Value,
        carbon_emitted: String,
        needs_review: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            file_type,
            bill_data,
            extracted: Json(extracted),
            carbon_emitted: Some(carbon_emitted),
            needs_review,
            uploaded_at: Utc::now(),
        }
    }

    /// Persist the bill. Records are insert-only; nothing updates or
    /// deletes them.
    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bills
                (id, file_name, file_type, bill_data, extracted, carbon_emitted, needs_review, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(self.id)
        .bind(&self.file_name)
        .bind(&self.file_type)
        .bind(&self.bill_data)
        .bind(&self.extracted)
        .bind(&self.carbon_emitted)
        .bind(self.needs_review)
        .bind(self.uploaded_at)
        .execute(pool)
        .await
        .context("Failed to insert bill")?;

        Ok(())
    }

    /// Every bill, projected to the (billingMonth, carbonEmitted) pair the
    /// summary fold needs. Raw bytes stay in the database.
    pub async fn emission_rows(pool: &PgPool) -> Result<Vec<EmissionRow>> {
        sqlx::query_as::<_, EmissionRow>(
            r#"
            SELECT extracted->>'billingMonth' AS billing_month, carbon_emitted
            FROM bills
            "#,
        )
        .fetch_all(pool)
        .await
        .context("Failed to load emission rows")
    }

    /// The most recently uploaded bills, newest first.
    pub async fn recent_emission_rows(pool: &PgPool, limit: i64) -> Result<Vec<EmissionRow>> {
        sqlx::query_as::<_, EmissionRow>(
            r#"
            SELECT extracted->>'billingMonth' AS billing_month, carbon_emitted
            FROM bills
            ORDER BY uploaded_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .context("Failed to load recent bills")
    }
}

/// Slim read-side projection used by the summary and insight endpoints.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmissionRow {
    pub billing_month: Option<String>,
    pub carbon_emitted: Option<String>,
}

/// Accessors over the pass-through extraction JSON.
///
/// The model's output is persisted unvalidated, so individual fields are
/// read with explicit coercion rules instead of a typed schema.
pub struct ExtractedFields<'a>(pub &'a Value);

impl ExtractedFields<'_> {
    /// unitsConsumed as a number.
    ///
    /// Accepts a JSON number or a numeric string; anything else (missing,
    /// null, non-numeric) is None and the caller decides the fallback.
    pub fn units_consumed(&self) -> Option<f64> {
        match self.0.get("unitsConsumed") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// billingMonth, when present as a string.
    pub fn billing_month(&self) -> Option<&str> {
        self.0.get("billingMonth").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_units_consumed_from_number() {
        let fields = json!({"unitsConsumed": 250});
        assert_eq!(ExtractedFields(&fields).units_consumed(), Some(250.0));
    }

    #[test]
    fn test_units_consumed_from_numeric_string() {
        let fields = json!({"unitsConsumed": "250.5"});
        assert_eq!(ExtractedFields(&fields).units_consumed(), Some(250.5));
    }

    #[test]
    fn test_units_consumed_missing_or_junk_is_none() {
        assert_eq!(ExtractedFields(&json!({})).units_consumed(), None);
        assert_eq!(
            ExtractedFields(&json!({"unitsConsumed": null})).units_consumed(),
            None
        );
        assert_eq!(
            ExtractedFields(&json!({"unitsConsumed": "n/a"})).units_consumed(),
            None
        );
    }

    #[test]
    fn test_billing_month() {
        let fields = json!({"billingMonth": "Jan"});
        assert_eq!(ExtractedFields(&fields).billing_month(), Some("Jan"));
        assert_eq!(ExtractedFields(&json!({})).billing_month(), None);
    }
}
