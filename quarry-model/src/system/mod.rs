//! System entities.

mod user;

pub use user::User;
