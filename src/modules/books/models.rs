use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted book record.
///
/// `id` and the timestamps are server-assigned; `deleted_at` is the
/// soft-delete tombstone — a non-null value marks the row logically absent
/// while it remains physically present.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub rating: f64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create payload. Every field is optional and defaulted; server-assigned
/// fields sent by the caller are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub price: f64,
}
