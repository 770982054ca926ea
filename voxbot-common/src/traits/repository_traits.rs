use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::command::{CommandPatch, CommandQuery, CommandRecord};
use crate::models::user::{ProfilePatch, UserProfile};

/// Identity/Profile Store: per-user profile records keyed by username.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<UserProfile>, Error>;

    /// Fetches the profile, inserting a blank one on first contact.
    async fn get_or_create(&self, name: &str) -> Result<UserProfile, Error>;

    /// Reads the stored profile, applies the patch, writes the result
    /// back and returns the written copy. Concurrent patches for the
    /// same user are last-write-wins.
    async fn patch(&self, name: &str, patch: &ProfilePatch) -> Result<UserProfile, Error>;
}

/// Append-only command/question log.
#[async_trait]
pub trait CommandRecordRepository: Send + Sync {
    /// Upserts by the platform message id. On conflict the mutable
    /// message fields are refreshed but `created_at` is kept.
    async fn upsert(&self, record: &CommandRecord) -> Result<CommandRecord, Error>;

    async fn get_by_message_id(&self, message_id: &str) -> Result<Option<CommandRecord>, Error>;

    async fn get_by_num(&self, num: i64) -> Result<Option<CommandRecord>, Error>;

    /// Lists live records: not soft-deleted, not acknowledged, within
    /// the query's creation window, newest first, capped at `limit`.
    async fn find(&self, query: &CommandQuery, limit: i64) -> Result<Vec<CommandRecord>, Error>;

    async fn patch(
        &self,
        command_id: Uuid,
        patch: &CommandPatch,
    ) -> Result<Option<CommandRecord>, Error>;

    /// Soft delete: sets `deleted_at`, never removes the row.
    async fn soft_delete(&self, command_id: Uuid) -> Result<(), Error>;
}

/// Named, atomically incrementing sequence counters.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Increments the named counter by one and returns the new value.
    /// Must be a single atomic operation at the storage layer.
    async fn increment(&self, name: &str) -> Result<i64, Error>;
}
