/// `UserStore` implementation backed by `SQLite`
use crate::users;
use async_trait::async_trait;
use roster_core::{NewUser, Result, User, UserId, UserPatch, UserStore};
use sqlx::SqlitePool;

/// `SQLite`-backed user store
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        users::create(&self.pool, &user).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn list(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn replace(&self, id: UserId, user: NewUser) -> Result<User> {
        users::replace(&self.pool, id, &user).await
    }

    async fn apply_patch(&self, id: UserId, patch: UserPatch) -> Result<User> {
        users::apply_patch(&self.pool, id, &patch).await
    }

    async fn remove(&self, id: UserId) -> Result<()> {
        users::remove(&self.pool, id).await
    }
}
