// voxbot-core/src/lib.rs

pub mod db;
pub mod lookups;
pub mod repositories;
pub mod services;
pub mod test_utils;

pub use db::Database;
pub use voxbot_common::error::Error;
