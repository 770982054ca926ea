// File: voxbot-core/src/repositories/postgres/counters.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use voxbot_common::error::Error;
use voxbot_common::traits::repository_traits::CounterRepository;

pub struct PostgresCounterRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresCounterRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PostgresCounterRepository {
    async fn increment(&self, name: &str) -> Result<i64, Error> {
        // Single statement, so two concurrent increments can never
        // observe the same value.
        let row = sqlx::query(
            r#"
            INSERT INTO counters (name, value)
            VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET value = counters.value + 1
            RETURNING value
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get::<i64, _>("value")?)
    }
}
