// File: voxbot-core/src/repositories/postgres/commands.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use voxbot_common::error::Error;
use voxbot_common::models::command::{CommandPatch, CommandQuery, CommandRecord};
use voxbot_common::traits::repository_traits::CommandRecordRepository;

pub struct PostgresCommandRecordRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresCommandRecordRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn row_to_record(r: &sqlx::postgres::PgRow) -> Result<CommandRecord, Error> {
        let badges: serde_json::Value = r.try_get("badges")?;
        Ok(CommandRecord {
            command_id: r.try_get("command_id")?,
            message_id: r.try_get("message_id")?,
            num: r.try_get("num")?,
            message: r.try_get("message")?,
            parsed_message: r.try_get("parsed_message")?,
            user_id: r.try_get("user_id")?,
            username: r.try_get("username")?,
            badges: serde_json::from_value(badges)?,
            created_at: r.try_get("created_at")?,
            deleted_at: r.try_get("deleted_at")?,
            archived: r.try_get("archived")?,
            ack: r.try_get("ack")?,
            user: None,
        })
    }
}

#[async_trait]
impl CommandRecordRepository for PostgresCommandRecordRepository {
    async fn upsert(&self, record: &CommandRecord) -> Result<CommandRecord, Error> {
        let badges = serde_json::to_value(&record.badges)?;
        let row = sqlx::query(
            r#"
            INSERT INTO chat_commands (
                command_id,
                message_id,
                num,
                message,
                parsed_message,
                user_id,
                username,
                badges,
                created_at,
                deleted_at,
                archived,
                ack
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            ON CONFLICT (message_id) DO UPDATE SET
                num = COALESCE(EXCLUDED.num, chat_commands.num),
                message = EXCLUDED.message,
                parsed_message = EXCLUDED.parsed_message,
                user_id = EXCLUDED.user_id,
                username = EXCLUDED.username,
                badges = EXCLUDED.badges
            RETURNING command_id, message_id, num, message, parsed_message,
                      user_id, username, badges, created_at, deleted_at,
                      archived, ack
            "#,
        )
        .bind(record.command_id)
        .bind(&record.message_id)
        .bind(record.num)
        .bind(&record.message)
        .bind(&record.parsed_message)
        .bind(&record.user_id)
        .bind(&record.username)
        .bind(badges)
        .bind(record.created_at)
        .bind(record.deleted_at)
        .bind(record.archived)
        .bind(record.ack)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_record(&row)
    }

    async fn get_by_message_id(&self, message_id: &str) -> Result<Option<CommandRecord>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT command_id, message_id, num, message, parsed_message,
                   user_id, username, badges, created_at, deleted_at,
                   archived, ack
            FROM chat_commands
            WHERE message_id = $1
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?;

        match row_opt {
            Some(r) => Ok(Some(Self::row_to_record(&r)?)),
            None => Ok(None),
        }
    }

    async fn get_by_num(&self, num: i64) -> Result<Option<CommandRecord>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT command_id, message_id, num, message, parsed_message,
                   user_id, username, badges, created_at, deleted_at,
                   archived, ack
            FROM chat_commands
            WHERE num = $1
            "#,
        )
        .bind(num)
        .fetch_optional(&self.pool)
        .await?;

        match row_opt {
            Some(r) => Ok(Some(Self::row_to_record(&r)?)),
            None => Ok(None),
        }
    }

    async fn find(&self, query: &CommandQuery, limit: i64) -> Result<Vec<CommandRecord>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT command_id, message_id, num, message, parsed_message,
                   user_id, username, badges, created_at, deleted_at,
                   archived, ack
            FROM chat_commands
            WHERE deleted_at IS NULL
              AND ack IS NOT TRUE
              AND ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
              AND ($3::text IS NULL OR user_id = $3)
              AND ($4::bool IS NOT TRUE OR message ~ '^\w')
            ORDER BY created_at DESC
            LIMIT $5
            "#,
        )
        .bind(query.created_from)
        .bind(query.created_to)
        .bind(&query.user_id)
        .bind(query.exclude_commands)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::new();
        for r in rows {
            records.push(Self::row_to_record(&r)?);
        }
        Ok(records)
    }

    async fn patch(
        &self,
        command_id: Uuid,
        patch: &CommandPatch,
    ) -> Result<Option<CommandRecord>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT command_id, message_id, num, message, parsed_message,
                   user_id, username, badges, created_at, deleted_at,
                   archived, ack
            FROM chat_commands
            WHERE command_id = $1
            "#,
        )
        .bind(command_id)
        .fetch_optional(&self.pool)
        .await?;

        let current = match row_opt {
            Some(r) => Self::row_to_record(&r)?,
            None => return Ok(None),
        };
        let next = patch.apply(&current);

        sqlx::query(
            r#"
            UPDATE chat_commands
            SET num = $1,
                ack = $2,
                archived = $3,
                deleted_at = $4
            WHERE command_id = $5
            "#,
        )
        .bind(next.num)
        .bind(next.ack)
        .bind(next.archived)
        .bind(next.deleted_at)
        .bind(command_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(next))
    }

    async fn soft_delete(&self, command_id: Uuid) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE chat_commands
            SET deleted_at = NOW()
            WHERE command_id = $1
              AND deleted_at IS NULL
            "#,
        )
        .bind(command_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
