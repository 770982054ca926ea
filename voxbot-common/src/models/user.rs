use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user profile, keyed by the chat username. Created on first
/// mutation, never deleted.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct UserProfile {
    pub name: String,
    pub country: Option<String>,
    pub team: Option<String>,
    pub team_color: Option<String>,
    pub pronoun: Option<String>,
    pub status: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            country: None,
            team: None,
            team_color: None,
            pronoun: None,
            status: None,
            last_seen: None,
        }
    }
}

/// Partial profile update. For the clearable string fields the outer
/// `Option` means "touch this field at all", the inner one carries the
/// new value: `Some(None)` clears, `Some(Some(v))` sets, `None` leaves
/// the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub country: Option<Option<String>>,
    pub team: Option<Option<String>>,
    pub team_color: Option<Option<String>>,
    pub pronoun: Option<Option<String>>,
    pub status: Option<Option<String>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl ProfilePatch {
    pub fn last_seen(at: DateTime<Utc>) -> Self {
        Self {
            last_seen: Some(at),
            ..Default::default()
        }
    }

    /// Applies the patch to a fetched profile, producing the next value
    /// to be written back.
    pub fn apply(&self, profile: &UserProfile) -> UserProfile {
        let mut next = profile.clone();
        if let Some(v) = &self.country {
            next.country = v.clone();
        }
        if let Some(v) = &self.team {
            next.team = v.clone();
        }
        if let Some(v) = &self.team_color {
            next.team_color = v.clone();
        }
        if let Some(v) = &self.pronoun {
            next.pronoun = v.clone();
        }
        if let Some(v) = &self.status {
            next.status = v.clone();
        }
        if let Some(at) = self.last_seen {
            next.last_seen = Some(at);
        }
        next
    }
}
