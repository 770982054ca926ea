// voxbot-core/src/lookups/mod.rs
//
// Fixed reference tables used by profile commands. Lookups are
// case-insensitive; callers pass lowercased keys.

pub mod countries;
pub mod icons;
pub mod pronouns;

pub use countries::lookup_country;
pub use icons::is_team_icon;
pub use pronouns::is_valid_pronoun;
