//! Service layer: orchestration between routes and the lower crates.
//!
//! - [`auth`] - registration, credential verification, password hashing

pub mod auth;
