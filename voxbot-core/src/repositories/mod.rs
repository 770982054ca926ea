// voxbot-core/src/repositories/mod.rs

pub mod postgres;

pub use postgres::commands::PostgresCommandRecordRepository;
pub use postgres::counters::PostgresCounterRepository;
pub use postgres::user_profiles::PostgresUserProfileRepository;
