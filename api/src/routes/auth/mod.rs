//! Authentication routes: registration, login and the caller profile.

pub mod login;
pub mod me;
pub mod register;
