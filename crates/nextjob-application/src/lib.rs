//! Application layer for My Next Job.
//!
//! This crate provides the snapshot stores and mutation coordinators that sit
//! between a front end and the remote API.

pub mod coordinator;
pub mod next_job;
pub mod store;

pub use coordinator::{
    JobRoleCoordinator, NaturalKeyCoordinator, OpportunityCoordinator, SearchSessionCoordinator,
    WatchlistCoordinator,
};
pub use next_job::NextJob;
pub use store::{Refresh, ResourceStore, Snapshot};
