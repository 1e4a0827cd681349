//! Watchlist endpoints over HTTP.
//!
//! Entries are addressed by URL as a query parameter, never as a path segment,
//! so URLs containing `/`, `?` or `#` survive intact.

use async_trait::async_trait;
use nextjob_core::Result;
use nextjob_core::resource::{NaturalKeyApi, ResourceSource};
use nextjob_core::watchlist::{NewWatchlistEntry, WatchlistEntry};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::dto::{WatchlistEntryDto, convert_all};
use crate::transport::ApiTransport;

#[derive(Debug, Clone)]
pub struct HttpWatchlistApi {
    transport: ApiTransport,
}

impl HttpWatchlistApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ResourceSource<WatchlistEntry> for HttpWatchlistApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<WatchlistEntry>> {
        let request = self.transport.request(Method::GET, "/watchlist");
        let dtos: Vec<WatchlistEntryDto> = self.transport.json(request, cancel).await?;
        convert_all(dtos)
    }
}

#[async_trait]
impl NaturalKeyApi<WatchlistEntry> for HttpWatchlistApi {
    async fn create(&self, draft: &NewWatchlistEntry, cancel: &CancellationToken) -> Result<()> {
        let request = self
            .transport
            .request(Method::POST, "/watchlist")
            .json(draft);
        self.transport.execute(request, cancel).await
    }

    async fn delete(&self, url: &str, cancel: &CancellationToken) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, "/watchlist")
            .query(&[("url", url)]);
        self.transport.execute(request, cancel).await
    }
}
