//! Mutation coordinators.
//!
//! Each coordinator issues requests against one remote collection and reloads
//! that collection's [`ResourceStore`](crate::store::ResourceStore) after every
//! successful mutation. Nothing is retried.

mod job_role;
mod natural_key;
mod opportunity;
mod rename;
mod search_session;
mod watchlist;

pub use job_role::{JobRoleCoordinator, require_active_role};
pub use natural_key::NaturalKeyCoordinator;
pub use opportunity::OpportunityCoordinator;
pub use rename::{RenamePlan, execute_rename};
pub use search_session::SearchSessionCoordinator;
pub use watchlist::WatchlistCoordinator;
