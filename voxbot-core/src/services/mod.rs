
// File: voxbot-core/src/services/mod.rs

pub mod command_service;

pub use command_service::{ChatCommand, CommandService};
