//! Domain types, remote API traits and read views for the NextJob client.

pub mod config;
pub mod error;
pub mod job_role;
pub mod opportunity;
pub mod resource;
pub mod search_session;
pub mod view;
pub mod watchlist;

// Re-export common error type
pub use error::{NextJobError, Result};
