//! REST client for the marketplace backend

pub mod auth;
pub mod client;
pub mod error;
pub mod roles;

pub use auth::BackendRegistrar;
pub use client::ApiClient;
pub use error::ApiError;
