pub mod models;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::BotError;

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS consumption (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                username TEXT NOT NULL,
                amount REAL NOT NULL,
                date TIMESTAMP NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_consumption_date ON consumption(date)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── Consumption Operations ─────────────────────────────────────

    /// Append one consumption record and return its assigned id.
    pub async fn append_consumption(
        &self,
        user_id: i64,
        username: &str,
        amount: f64,
        logged_at: DateTime<Utc>,
    ) -> Result<i64, BotError> {
        let result = sqlx::query(
            "INSERT INTO consumption (user_id, username, amount, date) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(user_id)
        .bind(username)
        .bind(amount)
        .bind(logged_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All records with `date` in the closed interval `[start, end]`, unordered.
    pub async fn consumption_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<models::ConsumptionRecord>, BotError> {
        let records = sqlx::query_as::<_, models::ConsumptionRecord>(
            "SELECT * FROM consumption WHERE date BETWEEN ?1 AND ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
