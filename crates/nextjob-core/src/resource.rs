//! Resource traits shared by every collection the client manages.
//!
//! The remote API is the system of record. These traits describe the slice of
//! it the stores and coordinators need, so the application layer never talks
//! to HTTP directly.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// A record that lives in an identity-keyed collection.
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    /// The identity of a record: a surrogate id or a natural key.
    type Key: Clone + Debug + Display + Eq + Hash + Send + Sync + 'static;

    /// Human-readable entity name used in errors and logs.
    const KIND: &'static str;

    fn key(&self) -> &Self::Key;
}

/// A resource whose own URL is its identity.
///
/// The remote API has no way to change such a key in place. Renaming is a
/// delete followed by a create, which needs to rebuild a creation payload from
/// the record's non-key attributes.
pub trait NaturalKeyResource: Resource<Key = String> {
    /// Every attribute except the key and server-assigned values.
    type Fields: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Creation payload accepted by the remote collection.
    type Draft: Clone + Debug + Send + Sync + 'static;

    fn fields(&self) -> Self::Fields;

    fn draft(url: &str, fields: Self::Fields) -> Self::Draft;
}

/// Read side of a remote collection: the full list, nothing incremental.
#[async_trait]
pub trait ResourceSource<R: Resource>: Send + Sync {
    /// Fetches every record of the collection.
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<R>>;
}

/// Create and delete for a natural-key collection.
///
/// Deletion addresses the record by its URL passed as a query parameter.
#[async_trait]
pub trait NaturalKeyApi<R: NaturalKeyResource>: ResourceSource<R> {
    async fn create(&self, draft: &R::Draft, cancel: &CancellationToken) -> Result<()>;

    async fn delete(&self, url: &str, cancel: &CancellationToken) -> Result<()>;
}
