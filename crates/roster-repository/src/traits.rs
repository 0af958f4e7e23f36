//! Repository trait definitions.

use roster_core::{NewUser, RosterResult, User, UserId};
use async_trait::async_trait;

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and returns the persisted record with its assigned id.
    async fn create(&self, new_user: &NewUser) -> RosterResult<User>;

    /// Finds a user by ID. `Ok(None)` means no such row.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;
}
