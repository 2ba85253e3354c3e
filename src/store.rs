//! Database gateway: executes parameterized statements against PostgreSQL.

use crate::config::Settings;
use crate::sql::{BindValue, Statement, RECORD_COLUMN};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

/// The one seam between repositories and the database.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run a row-returning statement; each row is its `record` JSON column.
    async fn fetch(&self, statement: &Statement) -> Result<Vec<Value>, sqlx::Error>;

    /// Run a statement for its effect; returns the affected row count.
    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Release pooled connections. Called once on shutdown.
    async fn close(&self);
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the connection pool.
    pub async fn connect(settings: &Settings) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;
        Ok(Self { pool })
    }
}

fn bind_all<'q>(statement: &'q Statement) -> Query<'q, Postgres, PgArguments> {
    tracing::debug!(table = statement.table, sql = %statement.sql, params = ?statement.params, "query");
    let mut query = sqlx::query(&statement.sql);
    for p in &statement.params {
        query = match p {
            BindValue::Id(id) => query.bind(*id),
            BindValue::Record(fields) => query.bind(Value::Object(fields.clone())),
        };
    }
    query
}

#[async_trait]
impl Gateway for PgStore {
    async fn fetch(&self, statement: &Statement) -> Result<Vec<Value>, sqlx::Error> {
        let rows = bind_all(statement).fetch_all(&self.pool).await?;
        rows.iter().map(|r| r.try_get::<Value, _>(RECORD_COLUMN)).collect()
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let result = bind_all(statement).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
