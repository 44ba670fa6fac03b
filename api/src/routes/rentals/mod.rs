//! Rental lifecycle routes.

pub mod create;
pub mod delete;
pub mod finish;
pub mod get;
pub mod list;
pub mod list_for_car;
pub mod update;

use rw_core::services::rental::Actor;

use crate::middleware::AuthContext;

pub(crate) fn actor(auth: &AuthContext) -> Actor {
    Actor::new(auth.user_id, auth.role)
}
