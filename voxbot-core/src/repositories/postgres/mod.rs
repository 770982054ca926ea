pub mod commands;
pub mod counters;
pub mod user_profiles;
