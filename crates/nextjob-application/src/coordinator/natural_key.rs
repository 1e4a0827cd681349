//! Mutation coordinator shared by the URL-keyed collections.

use std::sync::Arc;

use nextjob_core::resource::{NaturalKeyApi, NaturalKeyResource};
use nextjob_core::watchlist::validate_url;
use nextjob_core::{NextJobError, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::rename::{RenamePlan, execute_rename};
use crate::store::{Refresh, ResourceStore, Snapshot};

/// Create, delete and rename for a collection keyed by URL, each followed by a
/// reload of the collection's store.
pub struct NaturalKeyCoordinator<R: NaturalKeyResource> {
    api: Arc<dyn NaturalKeyApi<R>>,
    store: Arc<ResourceStore<R>>,
}

impl<R: NaturalKeyResource> NaturalKeyCoordinator<R> {
    pub fn new<A>(api: Arc<A>) -> Self
    where
        A: NaturalKeyApi<R> + 'static,
    {
        let store = Arc::new(ResourceStore::new(api.clone()));
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<ResourceStore<R>> {
        &self.store
    }

    pub async fn load(&self, cancel: &CancellationToken) -> Result<Arc<Snapshot<R>>> {
        self.store.load(cancel).await
    }

    /// Creates a record from an already validated draft.
    pub async fn create(&self, draft: &R::Draft, cancel: &CancellationToken) -> Result<Refresh<R>> {
        self.api.create(draft, cancel).await?;
        info!(kind = R::KIND, "Created");
        Ok(self.store.refresh(cancel).await)
    }

    pub async fn delete(&self, url: &str, cancel: &CancellationToken) -> Result<Refresh<R>> {
        let url = validate_url(url)?;
        self.api.delete(&url, cancel).await?;
        info!(kind = R::KIND, %url, "Deleted");
        Ok(self.store.refresh(cancel).await)
    }

    /// Moves the record at `old_url` to `new_url` with the given fields.
    ///
    /// If the create step fails the old record is recreated with the fields it
    /// had in the current snapshot, or with `fields` when it is not cached.
    pub async fn rename(
        &self,
        old_url: &str,
        new_url: &str,
        fields: R::Fields,
        cancel: &CancellationToken,
    ) -> Result<Refresh<R>> {
        let old_key = validate_url(old_url)?;
        let restore = self
            .store
            .get(&old_key)
            .await
            .map(|record| record.fields())
            .unwrap_or_else(|| fields.clone());
        self.rename_with_restore(old_url, new_url, fields, restore, cancel)
            .await
    }

    /// Moves a record that must be in the current snapshot, deriving its new
    /// fields from the cached ones.
    pub async fn rename_cached(
        &self,
        old_url: &str,
        new_url: &str,
        derive: impl FnOnce(R::Fields) -> R::Fields,
        cancel: &CancellationToken,
    ) -> Result<Refresh<R>> {
        let old_key = validate_url(old_url)?;
        let record = self
            .store
            .get(&old_key)
            .await
            .ok_or_else(|| NextJobError::not_found(R::KIND, &old_key))?;
        let restore = record.fields();
        let fields = derive(record.fields());
        self.rename_with_restore(&old_key, new_url, fields, restore, cancel)
            .await
    }

    async fn rename_with_restore(
        &self,
        old_url: &str,
        new_url: &str,
        fields: R::Fields,
        restore: R::Fields,
        cancel: &CancellationToken,
    ) -> Result<Refresh<R>> {
        let plan = RenamePlan {
            old_key: validate_url(old_url)?,
            new_key: validate_url(new_url)?,
            fields,
            restore,
        };

        match execute_rename(self.api.as_ref(), plan, cancel).await {
            Ok(()) => Ok(self.store.refresh(cancel).await),
            Err(e) => {
                // Only a rename cancelled before its delete step leaves the
                // remote collection untouched for certain.
                if !e.is_cancelled() {
                    let refresh = self.store.refresh(&CancellationToken::new()).await;
                    if let Some(reload_error) = refresh.reload_error() {
                        warn!(kind = R::KIND, error = %reload_error, "Reload after failed rename failed");
                    }
                }
                Err(e)
            }
        }
    }
}
