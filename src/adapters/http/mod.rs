//! HTTP adapters for the remote auth and registration services.

pub mod auth_api;
pub mod registration_api;

pub use auth_api::AuthApi;
pub use registration_api::RegistrationApi;
