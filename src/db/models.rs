use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One logged consumption event. Append-only: never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}
