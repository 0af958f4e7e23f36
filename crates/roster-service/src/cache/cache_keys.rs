//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Namespace for user entries.
const USER_PREFIX: &str = "user";

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("{}:{}", USER_PREFIX, id)
}
