/// API route modules
pub mod health;
pub mod home;
pub mod users;
