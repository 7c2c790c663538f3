//! Roster Core
//!
//! Transport-agnostic core types, traits, and error handling for Roster.
//!
//! This crate defines:
//! - **Domain Types**: `User`, `NewUser`, `UserPatch`
//! - **Store Contract**: the [`UserStore`] trait implemented by storage backends
//! - **Error Handling**: unified [`RosterError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::{NewUser, UserPatch};
//!
//! // Validated create payload
//! let user = NewUser::new("alice", "a@x.com").unwrap();
//! assert_eq!(user.name, "alice");
//!
//! // A patch may touch any subset of fields
//! let patch = UserPatch::new(None, Some("new@x.com".to_string())).unwrap();
//! assert!(!patch.is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Result, RosterError};
pub use store::UserStore;
pub use types::{NewUser, User, UserId, UserPatch};
