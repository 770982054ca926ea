use serde::{Deserialize, Serialize};

/// Badge flags delivered alongside a chat message by the upstream
/// platform. Unknown badge keys are dropped on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Badges {
    pub moderator: bool,
    pub broadcaster: bool,
    pub vip: bool,
    pub subscriber: bool,
}

/// One inbound chat line, as handed over by the platform client.
/// `parsed_message` is the pre-normalized (emote-stripped) form and is
/// preferred over `message` when extracting free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: String,
    pub user_id: String,
    pub username: String,
    pub message: String,
    #[serde(default)]
    pub badges: Badges,
    pub parsed_message: Option<String>,
}
