//! Core client state: configuration, durable storage, and the session

pub mod config;
pub mod session;
pub mod storage;
pub mod token;

pub use config::Config;
pub use session::Session;
pub use storage::{ClientStore, StoredUser};
pub use token::{Claims, TokenError};
