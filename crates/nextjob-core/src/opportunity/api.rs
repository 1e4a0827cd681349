//! Remote API for opportunities.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::model::{Opportunity, OpportunityStatus};
use crate::error::Result;
use crate::resource::NaturalKeyApi;

/// The opportunity endpoints of the remote API, on top of create/delete by URL.
#[async_trait]
pub trait OpportunityApi: NaturalKeyApi<Opportunity> {
    /// Sets the status of the opportunity at `url`.
    ///
    /// Returns the updated record as the server stored it, including the new
    /// `last_update` timestamp.
    async fn update_status(
        &self,
        url: &str,
        status: OpportunityStatus,
        cancel: &CancellationToken,
    ) -> Result<Opportunity>;

    /// Deletes every opportunity in one request.
    async fn delete_all(&self, cancel: &CancellationToken) -> Result<()>;
}
