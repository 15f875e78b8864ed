//! BMV: BookMyVenue client toolkit
//!
//! A terminal client for the BookMyVenue marketplace backend: account
//! registration and login, the role catalog, and browsing the venue and
//! vendor listings.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod schema;
pub mod wizard;
