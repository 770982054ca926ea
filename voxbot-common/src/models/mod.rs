// File: voxbot-common/src/models/mod.rs
pub mod chat;
pub mod command;
pub mod user;

pub use chat::{Badges, ChatMessage};
pub use command::{CommandPatch, CommandQuery, CommandRecord};
pub use user::{ProfilePatch, UserProfile};
