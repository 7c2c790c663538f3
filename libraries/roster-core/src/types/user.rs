//! User types

use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Maximum length of a user name, in characters
pub const NAME_MAX_LEN: usize = 80;

/// Maximum length of a user email, in characters
pub const EMAIL_MAX_LEN: usize = 120;

/// A user record
///
/// `id` is assigned by the store on creation and is stable for the lifetime
/// of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Validated data for creating or fully replacing a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Validated data for partially updating a user
///
/// Fields left as `None` keep their prior value. A patch with no fields is
/// legal and leaves the record unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl NewUser {
    /// Build a validated create/replace payload
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        validate_len("name", &name, NAME_MAX_LEN)?;
        validate_len("email", &email, EMAIL_MAX_LEN)?;
        Ok(Self { name, email })
    }
}

impl UserPatch {
    /// Build a validated patch from optional fields
    pub fn new(name: Option<String>, email: Option<String>) -> Result<Self> {
        if let Some(ref name) = name {
            validate_len("name", name, NAME_MAX_LEN)?;
        }
        if let Some(ref email) = email {
            validate_len("email", email, EMAIL_MAX_LEN)?;
        }
        Ok(Self { name, email })
    }

    /// Whether the patch touches no fields
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn validate_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.is_empty() {
        return Err(RosterError::validation(
            field,
            format!("{field} must not be empty"),
        ));
    }
    if value.chars().count() > max {
        return Err(RosterError::validation(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}
