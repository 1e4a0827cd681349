//! Remote API for search sessions.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::model::SearchSession;
use crate::error::Result;
use crate::resource::ResourceSource;

#[async_trait]
pub trait SearchSessionApi: ResourceSource<SearchSession> {
    async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<()>;
}
