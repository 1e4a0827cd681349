//! Job role mutations and the single-active-role guard.

use std::sync::Arc;

use nextjob_core::job_role::{
    ActiveRole, JobRole, JobRoleApi, JobRoleUpdate, NewJobRole, check_single_active,
};
use nextjob_core::{NextJobError, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::store::{Refresh, ResourceStore, Snapshot};

/// Coordinates job role mutations.
///
/// Every reload, whether explicit or after a mutation, is followed by the
/// at-most-one-active check. A violation is returned as
/// [`nextjob_core::error::Anomaly::MultipleActiveRoles`]; the snapshot still
/// holds what the server sent.
pub struct JobRoleCoordinator {
    api: Arc<dyn JobRoleApi>,
    store: Arc<ResourceStore<JobRole>>,
}

impl JobRoleCoordinator {
    pub fn new<A: JobRoleApi + 'static>(api: Arc<A>) -> Self {
        let store = Arc::new(ResourceStore::new(api.clone()));
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<ResourceStore<JobRole>> {
        &self.store
    }

    /// The API handle, shared with coordinators that need the active role.
    pub fn api(&self) -> Arc<dyn JobRoleApi> {
        Arc::clone(&self.api)
    }

    pub async fn load(&self, cancel: &CancellationToken) -> Result<Arc<Snapshot<JobRole>>> {
        let snapshot = self.store.load(cancel).await?;
        check_single_active(snapshot.items())?;
        Ok(snapshot)
    }

    /// Reads one role straight from the server.
    pub async fn get(&self, id: i64, cancel: &CancellationToken) -> Result<JobRole> {
        self.api.get(id, cancel).await
    }

    pub async fn create(
        &self,
        role: &NewJobRole,
        cancel: &CancellationToken,
    ) -> Result<Refresh<JobRole>> {
        role.validate()?;
        self.api.create(role, cancel).await?;
        info!(name = %role.name.trim(), "Job role created");
        self.refresh(cancel).await
    }

    pub async fn rename_role(
        &self,
        id: i64,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Refresh<JobRole>> {
        let update = JobRoleUpdate::rename(name.trim());
        update.validate()?;
        self.api.update(id, &update, cancel).await?;
        info!(id, name = %name.trim(), "Job role renamed");
        self.refresh(cancel).await
    }

    /// Marks a role active.
    ///
    /// Other roles are not deactivated here; the reload that follows checks
    /// the server actually left a single active role.
    pub async fn activate(&self, id: i64, cancel: &CancellationToken) -> Result<Refresh<JobRole>> {
        self.api.update(id, &JobRoleUpdate::activate(), cancel).await?;
        info!(id, "Job role activated");
        self.refresh(cancel).await
    }

    /// Deletes a role. The active role is refused locally.
    pub async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<Refresh<JobRole>> {
        if self.store.get(&id).await.is_some_and(|role| role.is_active) {
            return Err(NextJobError::validation(
                "id",
                "The active job role cannot be deleted",
            ));
        }
        self.api.delete(id, cancel).await?;
        info!(id, "Job role deleted");
        self.refresh(cancel).await
    }

    pub async fn download_cv(&self, id: i64, cancel: &CancellationToken) -> Result<Vec<u8>> {
        self.api.download_cv(id, cancel).await
    }

    pub async fn active_role(&self, cancel: &CancellationToken) -> Result<Option<ActiveRole>> {
        self.api.active_role(cancel).await
    }

    async fn refresh(&self, cancel: &CancellationToken) -> Result<Refresh<JobRole>> {
        let refresh = self.store.refresh(cancel).await;
        if let Refresh::Fresh(snapshot) = &refresh {
            check_single_active(snapshot.items())?;
        }
        Ok(refresh)
    }
}

/// Looks up the active role, failing when none is active.
pub async fn require_active_role(
    api: &dyn JobRoleApi,
    cancel: &CancellationToken,
) -> Result<ActiveRole> {
    api.active_role(cancel)
        .await?
        .ok_or_else(|| NextJobError::validation("job_role_id", "No active job role found"))
}
