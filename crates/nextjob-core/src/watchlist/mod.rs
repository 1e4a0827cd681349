//! Watchlist domain module.
//!
//! Entries are keyed by URL; the remote side is any
//! [`NaturalKeyApi<WatchlistEntry>`](crate::resource::NaturalKeyApi).

mod model;
mod request;

pub use model::{LastVisitPolicy, PageType, WatchlistEntry, WatchlistFields};
pub use request::{NewWatchlistEntry, validate_url};
