//! Users module - account records created on first login.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{FinancialsUpdate, NewUser, User, UserId};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
