use std::sync::Arc;

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::lookups::{is_team_icon, is_valid_pronoun, lookup_country};
use crate::Error;
use voxbot_common::models::{
    ChatMessage, CommandPatch, CommandQuery, CommandRecord, ProfilePatch,
};
use voxbot_common::traits::repository_traits::{
    CommandRecordRepository, CounterRepository, UserProfileRepository,
};

/// Counter that hands out question numbers.
const QUESTION_COUNTER: &str = "question";

/// Default trailing window for the read path.
const RECENT_WINDOW_HOURS: i64 = 6;

/// Hard cap on listing results.
const FIND_LIMIT: i64 = 1000;

static ARCHIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!archive\s+#?(\d+)\s*$").unwrap());

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-f]{3}|[0-9a-f]{6})$").unwrap());

/// The command a chat line was recognized as. Evaluation is ordered and
/// first match wins; anything unrecognized falls through to `Plain` and
/// is stored with no side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// `!archive #?<digits>` spanning the whole line.
    Archive { num: i64 },
    /// `!ask` / `!idea` / `!submit` plus the remaining text.
    Submit { text: String },
    /// `!here` with nothing after it.
    Here,
    /// `!setstatus` followed by whitespace; empty text is a valid
    /// (empty) status, not a clear.
    SetStatus { text: String },
    ClearStatus,
    /// Argument commands carry their lowercased second token, or `None`
    /// when the token is missing (a no-op invocation).
    Country { key: Option<String> },
    Team { key: Option<String> },
    TeamColor { key: Option<String> },
    Pronoun { key: Option<String> },
    /// Not a command; stored verbatim.
    Plain,
}

impl ChatCommand {
    /// Recognizes the command a raw chat line represents. Recognition
    /// always runs on `message`; only the `!setstatus` free text is
    /// taken from `parsed_message` when present, so user-visible status
    /// comes from the emote-stripped form.
    pub fn parse(message: &str, parsed_message: Option<&str>) -> ChatCommand {
        if !message.starts_with('!') {
            return ChatCommand::Plain;
        }

        if let Some(caps) = ARCHIVE_RE.captures(message) {
            if let Ok(num) = caps[1].parse::<i64>() {
                return ChatCommand::Archive { num };
            }
            // Out-of-range digits are not a usable question number.
            return ChatCommand::Plain;
        }

        // `!setstatus` needs the separator to count as a match; a bare
        // `!setstatus` is plain chat.
        if let Some(rest) = message.strip_prefix("!setstatus") {
            if rest.starts_with(char::is_whitespace) {
                let source = parsed_message.unwrap_or(message);
                let text = source
                    .split_whitespace()
                    .skip(1)
                    .collect::<Vec<_>>()
                    .join(" ");
                return ChatCommand::SetStatus { text };
            }
            return ChatCommand::Plain;
        }

        let tokens: Vec<&str> = message.split_whitespace().collect();
        let arg = |tokens: &[&str]| tokens.get(1).map(|t| t.to_lowercase());

        match tokens.first().copied() {
            Some("!ask") | Some("!idea") | Some("!submit") => ChatCommand::Submit {
                text: tokens[1..].join(" "),
            },
            Some("!here") if tokens.len() == 1 => ChatCommand::Here,
            Some("!clearstatus") => ChatCommand::ClearStatus,
            Some("!country") | Some("!flag") => ChatCommand::Country { key: arg(&tokens) },
            Some("!team") => ChatCommand::Team { key: arg(&tokens) },
            Some("!team-color") | Some("!team-colour") => {
                ChatCommand::TeamColor { key: arg(&tokens) }
            }
            Some("!pronoun") => ChatCommand::Pronoun { key: arg(&tokens) },
            _ => ChatCommand::Plain,
        }
    }
}

fn is_clear(key: &str) -> bool {
    key == "clear" || key == "remove"
}

/// The command dispatcher: turns one inbound chat message into at most
/// one stored command record plus its profile/archive side effects.
pub struct CommandService {
    profile_repo: Arc<dyn UserProfileRepository>,
    command_repo: Arc<dyn CommandRecordRepository>,
    counter_repo: Arc<dyn CounterRepository>,
}

impl CommandService {
    pub fn new(
        profile_repo: Arc<dyn UserProfileRepository>,
        command_repo: Arc<dyn CommandRecordRepository>,
        counter_repo: Arc<dyn CounterRepository>,
    ) -> Self {
        debug!("Initializing CommandService");
        Self {
            profile_repo,
            command_repo,
            counter_repo,
        }
    }

    /// Processes one chat message: runs the side effect of the command
    /// it matches (if any), upserts the record, and returns it with the
    /// author's profile snapshot attached.
    ///
    /// Malformed, unauthorized, and not-found command invocations are
    /// recorded like any other chat line but mutate nothing; only store
    /// I/O failures surface as errors.
    pub async fn dispatch(&self, message: &ChatMessage) -> Result<CommandRecord, Error> {
        debug!(
            "dispatch() message_id='{}' user='{}' text='{}'",
            message.message_id, message.username, message.message
        );

        // Duplicate delivery: the record already exists, so no side
        // effect (counter included) runs again.
        if let Some(existing) = self
            .command_repo
            .get_by_message_id(&message.message_id)
            .await?
        {
            debug!(
                "message_id='{}' already stored; skipping side effects",
                message.message_id
            );
            let profile = self.profile_repo.get_or_create(&message.username).await?;
            let mut record = existing;
            record.user = Some(profile);
            return Ok(record);
        }

        let mut profile = self.profile_repo.get_or_create(&message.username).await?;
        let command = ChatCommand::parse(&message.message, message.parsed_message.as_deref());
        let mut num = None;

        match &command {
            ChatCommand::Archive { num: target } => {
                self.handle_archive(message, *target).await?;
            }
            ChatCommand::Submit { text } => {
                if text.trim().is_empty() {
                    debug!("submission with no content; no number assigned");
                } else {
                    let value = self.counter_repo.increment(QUESTION_COUNTER).await?;
                    info!("question #{} submitted by '{}'", value, message.username);
                    num = Some(value);
                    profile = self
                        .profile_repo
                        .patch(&message.username, &ProfilePatch::last_seen(Utc::now()))
                        .await?;
                }
            }
            ChatCommand::Here => {
                profile = self
                    .profile_repo
                    .patch(&message.username, &ProfilePatch::last_seen(Utc::now()))
                    .await?;
            }
            ChatCommand::SetStatus { text } => {
                let patch = ProfilePatch {
                    status: Some(Some(text.clone())),
                    ..Default::default()
                };
                profile = self.profile_repo.patch(&message.username, &patch).await?;
            }
            ChatCommand::ClearStatus => {
                let patch = ProfilePatch {
                    status: Some(None),
                    ..Default::default()
                };
                profile = self.profile_repo.patch(&message.username, &patch).await?;
            }
            ChatCommand::Country { key } => {
                if let Some(key) = key {
                    let value = if is_clear(key) {
                        Some(None)
                    } else {
                        match lookup_country(key) {
                            Some(code) => Some(Some(code.to_string())),
                            None => {
                                debug!("unknown country key '{}'", key);
                                None
                            }
                        }
                    };
                    if let Some(country) = value {
                        let patch = ProfilePatch {
                            country: Some(country),
                            ..Default::default()
                        };
                        profile = self.profile_repo.patch(&message.username, &patch).await?;
                    }
                }
            }
            ChatCommand::Team { key } => {
                if let Some(key) = key {
                    if is_clear(key) {
                        let patch = ProfilePatch {
                            team: Some(None),
                            ..Default::default()
                        };
                        profile = self.profile_repo.patch(&message.username, &patch).await?;
                    } else if is_team_icon(key) {
                        let patch = ProfilePatch {
                            team: Some(Some(key.clone())),
                            ..Default::default()
                        };
                        profile = self.profile_repo.patch(&message.username, &patch).await?;
                    } else {
                        debug!("unknown team icon '{}'", key);
                    }
                }
            }
            ChatCommand::TeamColor { key } => {
                if let Some(key) = key {
                    if is_clear(key) {
                        let patch = ProfilePatch {
                            team_color: Some(None),
                            ..Default::default()
                        };
                        profile = self.profile_repo.patch(&message.username, &patch).await?;
                    } else {
                        let color = key.replacen('#', "", 1);
                        if HEX_COLOR_RE.is_match(&color) {
                            let patch = ProfilePatch {
                                team_color: Some(Some(color)),
                                ..Default::default()
                            };
                            profile =
                                self.profile_repo.patch(&message.username, &patch).await?;
                        } else {
                            debug!("invalid team color '{}'", key);
                        }
                    }
                }
            }
            ChatCommand::Pronoun { key } => {
                if let Some(key) = key {
                    if is_clear(key) {
                        let patch = ProfilePatch {
                            pronoun: Some(None),
                            ..Default::default()
                        };
                        profile = self.profile_repo.patch(&message.username, &patch).await?;
                    } else if is_valid_pronoun(key) {
                        let patch = ProfilePatch {
                            pronoun: Some(Some(key.clone())),
                            ..Default::default()
                        };
                        profile = self.profile_repo.patch(&message.username, &patch).await?;
                    } else {
                        debug!("unknown pronoun '{}'", key);
                    }
                }
            }
            ChatCommand::Plain => {}
        }

        let record = CommandRecord {
            command_id: Uuid::new_v4(),
            message_id: message.message_id.clone(),
            num,
            message: message.message.clone(),
            parsed_message: message.parsed_message.clone(),
            user_id: message.user_id.clone(),
            username: message.username.clone(),
            badges: message.badges.clone(),
            created_at: Utc::now(),
            deleted_at: None,
            archived: false,
            ack: false,
            user: None,
        };
        let mut stored = self.command_repo.upsert(&record).await?;
        stored.user = Some(profile);
        Ok(stored)
    }

    /// Archive request. Eligibility (exists, not archived, not deleted)
    /// and authorization (moderator/broadcaster badge or original
    /// submitter) both have to hold; otherwise the request is recorded
    /// but nothing is removed.
    async fn handle_archive(&self, message: &ChatMessage, num: i64) -> Result<(), Error> {
        let question = match self.command_repo.get_by_num(num).await? {
            Some(q) => q,
            None => {
                debug!("archive target #{} not found", num);
                return Ok(());
            }
        };
        if question.archived || question.deleted_at.is_some() {
            debug!("archive target #{} already archived or deleted", num);
            return Ok(());
        }
        let authorized = message.badges.moderator
            || message.badges.broadcaster
            || question.user_id == message.user_id;
        if !authorized {
            debug!(
                "user '{}' not authorized to archive #{}",
                message.username, num
            );
            return Ok(());
        }
        info!("archiving question #{}", num);
        self.command_repo.soft_delete(question.command_id).await
    }

    /// Lists live records. Without an explicit creation range the query
    /// covers the trailing window only.
    pub async fn find(&self, mut query: CommandQuery) -> Result<Vec<CommandRecord>, Error> {
        if query.created_from.is_none() && query.created_to.is_none() {
            query.created_from = Some(Utc::now() - Duration::hours(RECENT_WINDOW_HOURS));
        }
        self.command_repo.find(&query, FIND_LIMIT).await
    }

    pub async fn patch(
        &self,
        command_id: Uuid,
        patch: &CommandPatch,
    ) -> Result<Option<CommandRecord>, Error> {
        self.command_repo.patch(command_id, patch).await
    }

    /// Soft delete by storage id.
    pub async fn remove(&self, command_id: Uuid) -> Result<Uuid, Error> {
        self.command_repo.soft_delete(command_id).await?;
        Ok(command_id)
    }
}
