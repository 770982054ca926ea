use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use voxbot_common::error::Error;
use voxbot_common::models::command::{CommandPatch, CommandQuery, CommandRecord};
use voxbot_common::models::user::{ProfilePatch, UserProfile};
use voxbot_common::traits::repository_traits::{
    CommandRecordRepository, CounterRepository, UserProfileRepository,
};

/// Profile store backed by a map.
#[derive(Default)]
pub struct MemoryUserProfileRepository {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl MemoryUserProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserProfileRepository for MemoryUserProfileRepository {
    async fn get(&self, name: &str) -> Result<Option<UserProfile>, Error> {
        Ok(self.profiles.lock().unwrap().get(name).cloned())
    }

    async fn get_or_create(&self, name: &str) -> Result<UserProfile, Error> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .entry(name.to_string())
            .or_insert_with(|| UserProfile::new(name))
            .clone())
    }

    async fn patch(&self, name: &str, patch: &ProfilePatch) -> Result<UserProfile, Error> {
        let mut profiles = self.profiles.lock().unwrap();
        let current = profiles
            .entry(name.to_string())
            .or_insert_with(|| UserProfile::new(name));
        let next = patch.apply(current);
        *current = next.clone();
        Ok(next)
    }
}

/// Command log backed by a map keyed by storage id. `set_failing(true)`
/// makes every operation report a closed pool, for exercising the
/// store-failure path.
#[derive(Default)]
pub struct MemoryCommandRecordRepository {
    records: Mutex<HashMap<Uuid, CommandRecord>>,
    failing: AtomicBool,
}

impl MemoryCommandRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl CommandRecordRepository for MemoryCommandRecordRepository {
    async fn upsert(&self, record: &CommandRecord) -> Result<CommandRecord, Error> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let existing = records
            .values()
            .find(|r| r.message_id == record.message_id)
            .map(|r| r.command_id);

        let stored = match existing {
            Some(id) => {
                // Conflict path: refresh message fields, keep
                // created_at and the moderation flags. A stored number
                // is never displaced by a numberless write.
                let current = records.get_mut(&id).unwrap();
                current.num = record.num.or(current.num);
                current.message = record.message.clone();
                current.parsed_message = record.parsed_message.clone();
                current.user_id = record.user_id.clone();
                current.username = record.username.clone();
                current.badges = record.badges.clone();
                current.clone()
            }
            None => {
                let mut fresh = record.clone();
                fresh.user = None;
                records.insert(fresh.command_id, fresh.clone());
                fresh
            }
        };
        Ok(stored)
    }

    async fn get_by_message_id(&self, message_id: &str) -> Result<Option<CommandRecord>, Error> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| r.message_id == message_id)
            .cloned())
    }

    async fn get_by_num(&self, num: i64) -> Result<Option<CommandRecord>, Error> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| r.num == Some(num))
            .cloned())
    }

    async fn find(&self, query: &CommandQuery, limit: i64) -> Result<Vec<CommandRecord>, Error> {
        self.check()?;
        let records = self.records.lock().unwrap();
        let mut matched: Vec<CommandRecord> = records
            .values()
            .filter(|r| r.deleted_at.is_none())
            .filter(|r| !r.ack)
            .filter(|r| query.created_from.is_none_or(|from| r.created_at >= from))
            .filter(|r| query.created_to.is_none_or(|to| r.created_at <= to))
            .filter(|r| {
                query
                    .user_id
                    .as_ref()
                    .is_none_or(|uid| &r.user_id == uid)
            })
            .filter(|r| {
                if !query.exclude_commands {
                    return true;
                }
                r.message
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_')
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit as usize);
        Ok(matched)
    }

    async fn patch(
        &self,
        command_id: Uuid,
        patch: &CommandPatch,
    ) -> Result<Option<CommandRecord>, Error> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&command_id) {
            Some(current) => {
                let next = patch.apply(current);
                *current = next.clone();
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    async fn soft_delete(&self, command_id: Uuid) -> Result<(), Error> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&command_id) {
            if record.deleted_at.is_none() {
                record.deleted_at = Some(chrono::Utc::now());
            }
        }
        Ok(())
    }
}

/// Named counters backed by a map; increments are atomic under the lock.
#[derive(Default)]
pub struct MemoryCounterRepository {
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryCounterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, name: &str) -> i64 {
        self.counters.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl CounterRepository for MemoryCounterRepository {
    async fn increment(&self, name: &str) -> Result<i64, Error> {
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}
