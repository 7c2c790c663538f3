/// User API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use roster_core::{NewUser, User, UserId, UserPatch};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Both fields are required on create and replace
    fn into_new_user(self) -> Result<NewUser> {
        let name = self
            .name
            .ok_or_else(|| ServerError::validation("name", "name is required"))?;
        let email = self
            .email
            .ok_or_else(|| ServerError::validation("email", "email is required"))?;
        Ok(NewUser::new(name, email)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct PatchUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl PatchUserRequest {
    /// All fields are optional on patch; a bodyless patch is a no-op
    fn into_patch(self) -> Result<UserPatch> {
        Ok(UserPatch::new(self.name, self.email)?)
    }
}

/// GET /api/users - List all users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.store.list().await?;
    Ok(Json(users))
}

/// POST /api/users - Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.store.create(req.into_new_user()?).await?;

    resync_snapshot(&state).await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/:id - Get a single user
pub async fn get_user(
    Path(id): Path<UserId>,
    State(state): State<AppState>,
) -> Result<Json<User>> {
    let user = state
        .store
        .get(id)
        .await?
        .ok_or(ServerError::NotFound(id))?;

    Ok(Json(user))
}

/// PUT /api/users/:id - Replace both fields of a user
pub async fn replace_user(
    Path(id): Path<UserId>,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    let user = state.store.replace(id, req.into_new_user()?).await?;

    resync_snapshot(&state).await;

    Ok(Json(user))
}

/// PATCH /api/users/:id - Update only the fields present in the body
pub async fn patch_user(
    Path(id): Path<UserId>,
    State(state): State<AppState>,
    Json(req): Json<PatchUserRequest>,
) -> Result<Json<User>> {
    let user = state.store.apply_patch(id, req.into_patch()?).await?;

    resync_snapshot(&state).await;

    Ok(Json(user))
}

/// DELETE /api/users/:id - Delete a user
pub async fn delete_user(
    Path(id): Path<UserId>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    state.store.remove(id).await?;

    resync_snapshot(&state).await;

    Ok(Json(serde_json::json!({
        "message": format!("User {id} deleted")
    })))
}

/// Refresh the CSV snapshot after a committed mutation
///
/// Export failures are logged and never alter the response determined by the
/// store outcome.
async fn resync_snapshot(state: &AppState) {
    let users = match state.store.list().await {
        Ok(users) => users,
        Err(e) => {
            tracing::warn!("snapshot resync skipped, listing failed: {e}");
            return;
        }
    };

    if let Err(e) = state.exporter.resync(&users).await {
        tracing::warn!("snapshot resync failed: {e}");
    }
}
