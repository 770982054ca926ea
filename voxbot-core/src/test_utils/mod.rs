// File: voxbot-core/src/test_utils/mod.rs
//
// In-memory repository implementations for exercising the services
// without a running Postgres.

pub mod memory;

pub use memory::{
    MemoryCommandRecordRepository, MemoryCounterRepository, MemoryUserProfileRepository,
};

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber for test output; repeated calls are fine.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
