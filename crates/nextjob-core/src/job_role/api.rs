//! Remote API for job roles.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::model::{ActiveRole, JobRole};
use super::request::{JobRoleUpdate, NewJobRole};
use crate::error::Result;
use crate::resource::ResourceSource;

/// The job-role endpoints of the remote API.
///
/// Roles are addressed by surrogate id in the path. Whether the server keeps
/// a single active role when one is activated is not something this trait
/// promises; callers check the invariant after every reload.
#[async_trait]
pub trait JobRoleApi: ResourceSource<JobRole> {
    /// Reads a single role.
    async fn get(&self, id: i64, cancel: &CancellationToken) -> Result<JobRole>;

    /// Creates a role from a name and a curriculum vitae (multipart upload).
    ///
    /// The request must already have passed [`NewJobRole::validate`].
    async fn create(&self, role: &NewJobRole, cancel: &CancellationToken) -> Result<()>;

    /// Updates the name and/or active flag of a role.
    async fn update(
        &self,
        id: i64,
        update: &JobRoleUpdate,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<()>;

    /// Downloads the stored curriculum vitae as raw bytes.
    async fn download_cv(&self, id: i64, cancel: &CancellationToken) -> Result<Vec<u8>>;

    /// Looks up the active role, `None` when no role is active.
    async fn active_role(&self, cancel: &CancellationToken) -> Result<Option<ActiveRole>>;
}
