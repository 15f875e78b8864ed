//! Command implementations

pub mod completions;
pub mod config;
pub mod login;
pub mod logout;
pub mod register;
pub mod roles;
pub mod vendors;
pub mod venues;
pub mod whoami;
