mod group_tests;
mod reminder_tests;
mod user_tests;

use chrono::{Duration, Utc};

use crate::core::services::TaskboardService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::notify::in_memory::InMemoryNotifier;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

/// Fixed deadline of the Engineering walkthrough; valid only until it passes.
pub const SCENARIO_DEADLINE: &str = "2030-01-01T00:00:00Z";

/// RFC 3339 deadline `days` after the wall clock.
pub fn deadline_in(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

pub fn future_deadline() -> String {
    deadline_in(30)
}

// bcrypt's cheapest cost keeps the suite fast
const TEST_PASSWORD_COST: u32 = 4;

pub fn create_test_service() -> TaskboardService<InMemoryLogging, InMemoryStorage, InMemoryNotifier> {
    let _ = env_logger::try_init();
    create_test_service_with_storage(InMemoryStorage::new())
}

/// Shares `storage` with the service so a test can seed rows the service itself would refuse.
pub fn create_test_service_with_storage(
    storage: InMemoryStorage,
) -> TaskboardService<InMemoryLogging, InMemoryStorage, InMemoryNotifier> {
    TaskboardService::new(storage, InMemoryLogging::new(), InMemoryNotifier::new()).with_password_cost(TEST_PASSWORD_COST)
}
