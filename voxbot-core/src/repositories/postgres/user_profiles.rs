// File: voxbot-core/src/repositories/postgres/user_profiles.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use voxbot_common::error::Error;
use voxbot_common::models::user::{ProfilePatch, UserProfile};
use voxbot_common::traits::repository_traits::UserProfileRepository;

pub struct PostgresUserProfileRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresUserProfileRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_profile(r: &sqlx::postgres::PgRow) -> Result<UserProfile, Error> {
        Ok(UserProfile {
            name: r.try_get("name")?,
            country: r.try_get("country")?,
            team: r.try_get("team")?,
            team_color: r.try_get("team_color")?,
            pronoun: r.try_get("pronoun")?,
            status: r.try_get("status")?,
            last_seen: r.try_get::<Option<DateTime<Utc>>, _>("last_seen")?,
        })
    }
}

#[async_trait]
impl UserProfileRepository for PostgresUserProfileRepository {
    async fn get(&self, name: &str) -> Result<Option<UserProfile>, Error> {
        let row = sqlx::query(
            r#"
            SELECT name, country, team, team_color, pronoun, status, last_seen
            FROM user_profiles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_profile(&r)?)),
            None => Ok(None),
        }
    }

    async fn get_or_create(&self, name: &str) -> Result<UserProfile, Error> {
        // Blank insert on first contact; existing rows are untouched.
        let row = sqlx::query(
            r#"
            INSERT INTO user_profiles (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING name, country, team, team_color, pronoun, status, last_seen
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_profile(&row)
    }

    async fn patch(&self, name: &str, patch: &ProfilePatch) -> Result<UserProfile, Error> {
        // Read-modify-write; concurrent patches are last-write-wins.
        let current = self.get_or_create(name).await?;
        let next = patch.apply(&current);

        sqlx::query(
            r#"
            UPDATE user_profiles
            SET country = $1,
                team = $2,
                team_color = $3,
                pronoun = $4,
                status = $5,
                last_seen = $6
            WHERE name = $7
            "#,
        )
        .bind(&next.country)
        .bind(&next.team)
        .bind(&next.team_color)
        .bind(&next.pronoun)
        .bind(&next.status)
        .bind(next.last_seen)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(next)
    }
}
