//! Watchlist mutations.

use std::sync::Arc;

use nextjob_core::Result;
use nextjob_core::job_role::JobRoleApi;
use nextjob_core::resource::NaturalKeyApi;
use nextjob_core::watchlist::{LastVisitPolicy, NewWatchlistEntry, PageType, WatchlistEntry};
use tokio_util::sync::CancellationToken;

use super::job_role::require_active_role;
use super::natural_key::NaturalKeyCoordinator;
use crate::store::{Refresh, ResourceStore, Snapshot};

pub struct WatchlistCoordinator {
    entries: NaturalKeyCoordinator<WatchlistEntry>,
    roles: Arc<dyn JobRoleApi>,
}

impl WatchlistCoordinator {
    pub fn new<A>(api: Arc<A>, roles: Arc<dyn JobRoleApi>) -> Self
    where
        A: NaturalKeyApi<WatchlistEntry> + 'static,
    {
        Self {
            entries: NaturalKeyCoordinator::new(api),
            roles,
        }
    }

    pub fn store(&self) -> &Arc<ResourceStore<WatchlistEntry>> {
        self.entries.store()
    }

    pub async fn load(&self, cancel: &CancellationToken) -> Result<Arc<Snapshot<WatchlistEntry>>> {
        self.entries.load(cancel).await
    }

    /// Adds a never-visited career page for the active role.
    pub async fn add(
        &self,
        url: &str,
        page_type: Option<PageType>,
        cancel: &CancellationToken,
    ) -> Result<Refresh<WatchlistEntry>> {
        let entry = NewWatchlistEntry::new(url, 0, page_type).validate()?;
        let role = require_active_role(self.roles.as_ref(), cancel).await?;
        let entry = NewWatchlistEntry {
            job_role_id: role.id,
            ..entry
        };
        self.entries.create(&entry, cancel).await
    }

    pub async fn remove(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Refresh<WatchlistEntry>> {
        self.entries.delete(url, cancel).await
    }

    /// Moves an entry to a new URL, keeping its role and page type.
    ///
    /// `policy` decides whether the last visit carries over. If the move fails
    /// and is rolled back, the old entry gets its original last visit back
    /// either way.
    pub async fn rename(
        &self,
        old_url: &str,
        new_url: &str,
        policy: LastVisitPolicy,
        cancel: &CancellationToken,
    ) -> Result<Refresh<WatchlistEntry>> {
        self.entries
            .rename_cached(old_url, new_url, |fields| fields.apply(policy), cancel)
            .await
    }
}
