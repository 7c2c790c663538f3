//! User table queries

use roster_core::{NewUser, RosterError, User, UserId, UserPatch};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

type Result<T> = std::result::Result<T, RosterError>;

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get::<i64, _>("id"),
        name: row.get::<String, _>("name"),
        email: row.get::<String, _>("email"),
    }
}

/// Map a unique-constraint violation to a conflict naming the colliding field
///
/// `name` and `email` are the values the failed statement tried to write.
/// Any other error surfaces as a database error.
fn map_unique_violation(err: sqlx::Error, name: &str, email: &str) -> RosterError {
    if let Some(db_err) = err.as_database_error() {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            let message = db_err.message();
            if message.contains("users.name") {
                return RosterError::conflict("name", name);
            }
            if message.contains("users.email") {
                return RosterError::conflict("email", email);
            }
        }
    }
    RosterError::from(err)
}

/// Create a user, letting the engine assign the next id
pub async fn create(pool: &SqlitePool, user: &NewUser) -> Result<User> {
    let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
        .bind(&user.name)
        .bind(&user.email)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, &user.name, &user.email))?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| RosterError::database("Failed to retrieve created user"))
}

/// Get a user by id
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, email FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| user_from_row(&row)))
}

/// Get all users in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, email FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(user_from_row).collect())
}

/// Replace both fields of an existing user
pub async fn replace(pool: &SqlitePool, id: UserId, user: &NewUser) -> Result<User> {
    let result = sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
        .bind(&user.name)
        .bind(&user.email)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| map_unique_violation(e, &user.name, &user.email))?;

    if result.rows_affected() == 0 {
        return Err(RosterError::UserNotFound(id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or(RosterError::UserNotFound(id))
}

/// Update only the fields present in the patch
///
/// A single COALESCE update keeps the read-modify-write atomic; omitted
/// fields retain their prior values.
pub async fn apply_patch(pool: &SqlitePool, id: UserId, patch: &UserPatch) -> Result<User> {
    let result = sqlx::query(
        "UPDATE users
         SET name = COALESCE(?, name), email = COALESCE(?, email)
         WHERE id = ?",
    )
    .bind(patch.name.as_deref())
    .bind(patch.email.as_deref())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        map_unique_violation(
            e,
            patch.name.as_deref().unwrap_or_default(),
            patch.email.as_deref().unwrap_or_default(),
        )
    })?;

    if result.rows_affected() == 0 {
        return Err(RosterError::UserNotFound(id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or(RosterError::UserNotFound(id))
}

/// Delete a user
pub async fn remove(pool: &SqlitePool, id: UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RosterError::UserNotFound(id));
    }

    Ok(())
}
