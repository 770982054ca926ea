// tests/service_tests.rs
//
// Dispatcher behavior against the in-memory stores.

use std::sync::Arc;

use chrono::Utc;

use voxbot_core::services::CommandService;
use voxbot_core::test_utils::{
    init_tracing, MemoryCommandRecordRepository, MemoryCounterRepository,
    MemoryUserProfileRepository,
};
use voxbot_core::Error;
use voxbot_common::models::{Badges, ChatMessage};
use voxbot_common::traits::repository_traits::{CommandRecordRepository, UserProfileRepository};

struct Harness {
    service: CommandService,
    profiles: Arc<MemoryUserProfileRepository>,
    commands: Arc<MemoryCommandRecordRepository>,
    counters: Arc<MemoryCounterRepository>,
}

fn harness() -> Harness {
    init_tracing();
    let profiles = Arc::new(MemoryUserProfileRepository::new());
    let commands = Arc::new(MemoryCommandRecordRepository::new());
    let counters = Arc::new(MemoryCounterRepository::new());
    let service = CommandService::new(profiles.clone(), commands.clone(), counters.clone());
    Harness {
        service,
        profiles,
        commands,
        counters,
    }
}

fn msg(id: &str, user: &str, text: &str) -> ChatMessage {
    ChatMessage {
        message_id: id.to_string(),
        user_id: format!("uid-{user}"),
        username: user.to_string(),
        message: text.to_string(),
        badges: Badges::default(),
        parsed_message: None,
    }
}

fn mod_msg(id: &str, user: &str, text: &str) -> ChatMessage {
    let mut m = msg(id, user, text);
    m.badges.moderator = true;
    m
}

#[tokio::test]
async fn submissions_get_strictly_increasing_numbers() -> Result<(), Error> {
    let h = harness();

    let a = h.service.dispatch(&msg("m1", "alice", "!ask why rust?")).await?;
    let b = h.service.dispatch(&msg("m2", "bob", "!idea do a poll")).await?;
    let c = h.service.dispatch(&msg("m3", "alice", "!submit more lifetimes")).await?;

    assert_eq!(a.num, Some(1));
    assert_eq!(b.num, Some(2));
    assert_eq!(c.num, Some(3));
    assert_eq!(h.counters.value("question"), 3);

    // submission bumps the author's last_seen
    let profile = h.profiles.get("alice").await?.unwrap();
    assert!(profile.last_seen.is_some());
    Ok(())
}

#[tokio::test]
async fn empty_submission_never_touches_the_counter() -> Result<(), Error> {
    let h = harness();

    let record = h.service.dispatch(&msg("m1", "alice", "!ask    ")).await?;

    assert_eq!(record.num, None);
    assert_eq!(h.counters.value("question"), 0);
    // the line itself is still on record
    assert!(h.commands.get_by_message_id("m1").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn moderator_can_archive_a_question() -> Result<(), Error> {
    let h = harness();

    let question = h.service.dispatch(&msg("q1", "alice", "!ask one?")).await?;
    h.service.dispatch(&mod_msg("a1", "mod", "!archive #1")).await?;

    let stored = h.commands.get_by_num(1).await?.unwrap();
    assert_eq!(stored.command_id, question.command_id);
    assert!(stored.deleted_at.is_some(), "question should be soft-deleted");

    // the archive request itself is recorded
    assert!(h.commands.get_by_message_id("a1").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn owner_can_archive_their_own_question() -> Result<(), Error> {
    let h = harness();

    h.service.dispatch(&msg("q1", "alice", "!ask one?")).await?;
    h.service.dispatch(&msg("a1", "alice", "!archive 1")).await?;

    assert!(h.commands.get_by_num(1).await?.unwrap().deleted_at.is_some());
    Ok(())
}

#[tokio::test]
async fn stranger_cannot_archive_someone_elses_question() -> Result<(), Error> {
    let h = harness();

    h.service.dispatch(&msg("q1", "alice", "!ask one?")).await?;
    let record = h.service.dispatch(&msg("a1", "mallory", "!archive #1")).await?;

    assert!(h.commands.get_by_num(1).await?.unwrap().deleted_at.is_none());
    // silent no-op, still dispatches cleanly
    assert_eq!(record.message, "!archive #1");
    Ok(())
}

#[tokio::test]
async fn archive_of_missing_or_already_deleted_question_is_a_noop() -> Result<(), Error> {
    let h = harness();

    // nothing numbered 42 exists
    h.service.dispatch(&mod_msg("a1", "mod", "!archive #42")).await?;

    // archiving twice: the second request finds a deleted question
    h.service.dispatch(&msg("q1", "alice", "!ask one?")).await?;
    h.service.dispatch(&mod_msg("a2", "mod", "!archive #1")).await?;
    h.service.dispatch(&mod_msg("a3", "mod", "!archive #1")).await?;

    assert!(h.commands.get_by_num(1).await?.unwrap().deleted_at.is_some());
    Ok(())
}

#[tokio::test]
async fn country_set_and_idempotent_clear() -> Result<(), Error> {
    let h = harness();

    h.service.dispatch(&msg("m1", "alice", "!country clear")).await?;
    h.service.dispatch(&msg("m2", "alice", "!country fr")).await?;
    assert_eq!(
        h.profiles.get("alice").await?.unwrap().country.as_deref(),
        Some("fr")
    );

    h.service.dispatch(&msg("m3", "alice", "!country clear")).await?;
    assert_eq!(h.profiles.get("alice").await?.unwrap().country, None);

    // unknown keys and missing arguments change nothing
    h.service.dispatch(&msg("m4", "alice", "!country atlantis")).await?;
    h.service.dispatch(&msg("m5", "alice", "!country")).await?;
    assert_eq!(h.profiles.get("alice").await?.unwrap().country, None);
    Ok(())
}

#[tokio::test]
async fn team_color_rejects_invalid_hex() -> Result<(), Error> {
    let h = harness();

    h.service.dispatch(&msg("m1", "alice", "!team-color abc")).await?;
    assert_eq!(
        h.profiles.get("alice").await?.unwrap().team_color.as_deref(),
        Some("abc")
    );

    // invalid hex leaves the prior value in place
    h.service.dispatch(&msg("m2", "alice", "!team-color zzzzzz")).await?;
    assert_eq!(
        h.profiles.get("alice").await?.unwrap().team_color.as_deref(),
        Some("abc")
    );

    // hash prefix is stripped, case folded, colour spelling accepted
    h.service.dispatch(&msg("m3", "alice", "!team-colour #AABBCC")).await?;
    assert_eq!(
        h.profiles.get("alice").await?.unwrap().team_color.as_deref(),
        Some("aabbcc")
    );
    Ok(())
}

#[tokio::test]
async fn team_and_pronoun_validate_against_reference_sets() -> Result<(), Error> {
    let h = harness();

    h.service.dispatch(&msg("m1", "alice", "!team rust")).await?;
    h.service.dispatch(&msg("m2", "alice", "!pronoun she/her")).await?;
    let profile = h.profiles.get("alice").await?.unwrap();
    assert_eq!(profile.team.as_deref(), Some("rust"));
    assert_eq!(profile.pronoun.as_deref(), Some("she/her"));

    h.service.dispatch(&msg("m3", "alice", "!team not-an-icon")).await?;
    h.service.dispatch(&msg("m4", "alice", "!pronoun whatever")).await?;
    let profile = h.profiles.get("alice").await?.unwrap();
    assert_eq!(profile.team.as_deref(), Some("rust"));
    assert_eq!(profile.pronoun.as_deref(), Some("she/her"));

    h.service.dispatch(&msg("m5", "alice", "!team remove")).await?;
    h.service.dispatch(&msg("m6", "alice", "!pronoun clear")).await?;
    let profile = h.profiles.get("alice").await?.unwrap();
    assert_eq!(profile.team, None);
    assert_eq!(profile.pronoun, None);
    Ok(())
}

#[tokio::test]
async fn here_advances_last_seen() -> Result<(), Error> {
    let h = harness();

    let before = Utc::now();
    let record = h.service.dispatch(&msg("m1", "alice", "!here")).await?;
    let after = Utc::now();

    let last_seen = record.user.unwrap().last_seen.unwrap();
    assert!(last_seen >= before && last_seen <= after);
    assert_eq!(record.num, None);

    // `!here` with trailing content is plain chat
    h.service.dispatch(&msg("m2", "bob", "!here now")).await?;
    assert_eq!(h.profiles.get("bob").await?.unwrap().last_seen, None);
    Ok(())
}

#[tokio::test]
async fn setstatus_and_clearstatus() -> Result<(), Error> {
    let h = harness();

    h.service.dispatch(&msg("m1", "alice", "!setstatus heads down")).await?;
    assert_eq!(
        h.profiles.get("alice").await?.unwrap().status.as_deref(),
        Some("heads down")
    );

    // empty remainder is an empty status, not a clear
    h.service.dispatch(&msg("m2", "alice", "!setstatus ")).await?;
    assert_eq!(
        h.profiles.get("alice").await?.unwrap().status.as_deref(),
        Some("")
    );

    h.service.dispatch(&msg("m3", "alice", "!clearstatus")).await?;
    assert_eq!(h.profiles.get("alice").await?.unwrap().status, None);
    Ok(())
}

#[tokio::test]
async fn status_text_comes_from_the_parsed_message() -> Result<(), Error> {
    let h = harness();

    let mut m = msg("m1", "alice", "!setstatus on a break Kappa");
    m.parsed_message = Some("!setstatus on a break".to_string());
    h.service.dispatch(&m).await?;

    assert_eq!(
        h.profiles.get("alice").await?.unwrap().status.as_deref(),
        Some("on a break")
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_delivery_runs_no_side_effects_twice() -> Result<(), Error> {
    let h = harness();

    let first = h.service.dispatch(&msg("m1", "alice", "!ask once?")).await?;
    let second = h.service.dispatch(&msg("m1", "alice", "!ask once?")).await?;

    assert_eq!(first.command_id, second.command_id);
    assert_eq!(second.num, Some(1));
    assert_eq!(h.counters.value("question"), 1, "counter must not double-increment");
    Ok(())
}

#[tokio::test]
async fn plain_chat_is_stored_with_no_mutation() -> Result<(), Error> {
    let h = harness();

    let record = h.service.dispatch(&msg("m1", "alice", "hello chat")).await?;

    assert_eq!(record.num, None);
    assert_eq!(record.message, "hello chat");
    let profile = h.profiles.get("alice").await?.unwrap();
    assert_eq!(profile.last_seen, None);
    assert_eq!(profile.status, None);
    Ok(())
}

#[tokio::test]
async fn store_failure_propagates_to_the_caller() {
    let h = harness();
    h.commands.set_failing(true);

    let result = h.service.dispatch(&msg("m1", "alice", "!here")).await;
    assert!(matches!(result, Err(Error::Database(_))));
}
