use std::sync::Arc;

use nextjob_core::Result;
use nextjob_core::search_session::{SearchSession, SearchSessionApi};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::store::{Refresh, ResourceStore, Snapshot};

/// Lists and deletes search sessions. Sessions are produced elsewhere.
pub struct SearchSessionCoordinator {
    api: Arc<dyn SearchSessionApi>,
    store: Arc<ResourceStore<SearchSession>>,
}

impl SearchSessionCoordinator {
    pub fn new<A: SearchSessionApi + 'static>(api: Arc<A>) -> Self {
        let store = Arc::new(ResourceStore::new(api.clone()));
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<ResourceStore<SearchSession>> {
        &self.store
    }

    pub async fn load(&self, cancel: &CancellationToken) -> Result<Arc<Snapshot<SearchSession>>> {
        self.store.load(cancel).await
    }

    pub async fn delete(
        &self,
        id: i64,
        cancel: &CancellationToken,
    ) -> Result<Refresh<SearchSession>> {
        self.api.delete(id, cancel).await?;
        info!(id, "Search session deleted");
        Ok(self.store.refresh(cancel).await)
    }
}
