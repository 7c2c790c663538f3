mod user;

pub use user::{NewUser, User, UserId, UserPatch, EMAIL_MAX_LEN, NAME_MAX_LEN};
