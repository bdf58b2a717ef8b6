//! SDK resource modules
//!
//! Resource-specific clients for HIT and assignment operations.

use std::time::Duration;

pub mod assignments;
pub mod hits;

pub use assignments::AssignmentsClient;
pub use hits::HitsClient;

/// Largest page the list operations accept
pub const MAX_RESULTS: i32 = 100;

/// Whole seconds as sent on the wire, saturating at `i64::MAX`.
pub(crate) fn seconds(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
