//! Store contract for user persistence

use crate::error::Result;
use crate::types::{NewUser, User, UserId, UserPatch};
use async_trait::async_trait;

/// Store contract owning user rows
///
/// This trait abstracts persistence so the HTTP layer depends only on the
/// contract, not on a specific database. Implementations must keep the
/// uniqueness invariants (no two users share a `name` or an `email`) and must
/// apply each mutation atomically: concurrent callers never observe a
/// half-applied write.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user, assigning a fresh id
    ///
    /// Fails with `Conflict` when the name or email is already taken. Ids are
    /// never reused after deletion within the same store instance.
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Get a user by id, `None` when absent
    async fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Get all users in insertion order
    async fn list(&self) -> Result<Vec<User>>;

    /// Replace both fields of an existing user
    ///
    /// Fails with `UserNotFound` when the id is absent, `Conflict` when the
    /// new value collides with another row.
    async fn replace(&self, id: UserId, user: NewUser) -> Result<User>;

    /// Update only the fields present in the patch
    ///
    /// Omitted fields keep their prior value; an empty patch returns the
    /// record unchanged. Fails with `UserNotFound` when the id is absent.
    async fn apply_patch(&self, id: UserId, patch: UserPatch) -> Result<User>;

    /// Delete a user
    ///
    /// Fails with `UserNotFound` when the id is absent.
    async fn remove(&self, id: UserId) -> Result<()>;
}
