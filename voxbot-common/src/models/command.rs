use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::chat::Badges;
use crate::models::user::UserProfile;

/// One stored chat command/question. Exactly one record exists per
/// inbound message id; `num` is assigned only to question submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Storage id.
    pub command_id: Uuid,
    /// Platform message id; unique, upsert key.
    pub message_id: String,
    pub num: Option<i64>,
    pub message: String,
    pub parsed_message: Option<String>,
    pub user_id: String,
    pub username: String,
    pub badges: Badges,
    pub created_at: DateTime<Utc>,
    /// Soft-delete marker; a set value excludes the record from listings.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Terminal "resolved" state, set externally.
    pub archived: bool,
    pub ack: bool,
    /// Profile snapshot attached by the dispatcher on return; never
    /// persisted with the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// Read-path filter. Defaults (trailing window, ack/deleted exclusion,
/// ordering, result cap) are applied by the service and repository.
#[derive(Debug, Clone, Default)]
pub struct CommandQuery {
    pub user_id: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    /// Restrict to plain chat: messages whose first character is a word
    /// character rather than a command prefix.
    pub exclude_commands: bool,
}

/// Partial update for the fields that remain mutable after creation.
#[derive(Debug, Clone, Default)]
pub struct CommandPatch {
    pub num: Option<i64>,
    pub ack: Option<bool>,
    pub archived: Option<bool>,
    pub deleted_at: Option<Option<DateTime<Utc>>>,
}

impl CommandPatch {
    /// Applies the patch to a fetched record, producing the row to be
    /// written back.
    pub fn apply(&self, record: &CommandRecord) -> CommandRecord {
        let mut next = record.clone();
        if let Some(num) = self.num {
            next.num = Some(num);
        }
        if let Some(ack) = self.ack {
            next.ack = ack;
        }
        if let Some(archived) = self.archived {
            next.archived = archived;
        }
        if let Some(deleted_at) = self.deleted_at {
            next.deleted_at = deleted_at;
        }
        next
    }
}
