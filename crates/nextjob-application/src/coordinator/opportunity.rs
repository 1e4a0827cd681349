//! Opportunity mutations, including the in-place status patch.

use std::sync::Arc;

use nextjob_core::Result;
use nextjob_core::job_role::JobRoleApi;
use nextjob_core::opportunity::{NewOpportunity, Opportunity, OpportunityApi, OpportunityStatus};
use nextjob_core::watchlist::validate_url;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::job_role::require_active_role;
use super::natural_key::NaturalKeyCoordinator;
use crate::store::{Refresh, ResourceStore, Snapshot};

pub struct OpportunityCoordinator {
    api: Arc<dyn OpportunityApi>,
    opportunities: NaturalKeyCoordinator<Opportunity>,
    roles: Arc<dyn JobRoleApi>,
}

impl OpportunityCoordinator {
    pub fn new<A: OpportunityApi + 'static>(api: Arc<A>, roles: Arc<dyn JobRoleApi>) -> Self {
        Self {
            opportunities: NaturalKeyCoordinator::new(api.clone()),
            api,
            roles,
        }
    }

    pub fn store(&self) -> &Arc<ResourceStore<Opportunity>> {
        self.opportunities.store()
    }

    pub async fn load(&self, cancel: &CancellationToken) -> Result<Arc<Snapshot<Opportunity>>> {
        self.opportunities.load(cancel).await
    }

    /// Records an opportunity by hand for the active role.
    pub async fn add(
        &self,
        url: &str,
        score: i64,
        status: OpportunityStatus,
        cancel: &CancellationToken,
    ) -> Result<Refresh<Opportunity>> {
        let draft = NewOpportunity::new(url, 0, score)
            .with_status(status)
            .validate()?;
        let role = require_active_role(self.roles.as_ref(), cancel).await?;
        let draft = NewOpportunity {
            job_role_id: role.id,
            ..draft
        };
        self.opportunities.create(&draft, cancel).await
    }

    /// Changes the status of one opportunity.
    ///
    /// The server echoes the updated record; it replaces the cached one
    /// without reloading the collection.
    pub async fn set_status(
        &self,
        url: &str,
        status: OpportunityStatus,
        cancel: &CancellationToken,
    ) -> Result<Arc<Snapshot<Opportunity>>> {
        let url = validate_url(url)?;
        let updated = self.api.update_status(&url, status, cancel).await?;
        info!(%url, %status, last_update = %updated.last_update, "Opportunity status updated");
        Ok(self.store().replace_record(updated).await)
    }

    pub async fn remove(&self, url: &str, cancel: &CancellationToken) -> Result<Refresh<Opportunity>> {
        self.opportunities.delete(url, cancel).await
    }

    /// Deletes every opportunity in one request. On failure the cache is left
    /// as it was.
    pub async fn remove_all(&self, cancel: &CancellationToken) -> Result<Refresh<Opportunity>> {
        self.api.delete_all(cancel).await?;
        info!("All opportunities deleted");
        Ok(self.store().refresh(cancel).await)
    }

    /// Moves an opportunity to a new URL, keeping role, score and status.
    pub async fn rename(
        &self,
        old_url: &str,
        new_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Refresh<Opportunity>> {
        self.opportunities
            .rename_cached(old_url, new_url, |fields| fields, cancel)
            .await
    }
}
