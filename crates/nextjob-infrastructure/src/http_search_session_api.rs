//! Search session endpoints over HTTP.

use async_trait::async_trait;
use nextjob_core::Result;
use nextjob_core::resource::ResourceSource;
use nextjob_core::search_session::{SearchSession, SearchSessionApi};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::dto::{SearchSessionDto, convert_all};
use crate::transport::ApiTransport;

#[derive(Debug, Clone)]
pub struct HttpSearchSessionApi {
    transport: ApiTransport,
}

impl HttpSearchSessionApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ResourceSource<SearchSession> for HttpSearchSessionApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<SearchSession>> {
        let request = self.transport.request(Method::GET, "/search-sessions");
        let dtos: Vec<SearchSessionDto> = self.transport.json(request, cancel).await?;
        convert_all(dtos)
    }
}

#[async_trait]
impl SearchSessionApi for HttpSearchSessionApi {
    async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, &format!("/search-sessions/{id}"));
        self.transport.execute(request, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use nextjob_core::config::ApiConfig;

    #[tokio::test]
    async fn test_list_and_delete() {
        let mut server = Server::new_async().await;
        let list = server
            .mock("GET", "/search-sessions")
            .with_status(200)
            .with_body(
                r#"[{"id":9,"start_datetime":"2025-06-01T08:00:00","end_datetime":null,"score_threshold":80,"log_file_path":null}]"#,
            )
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/search-sessions/9")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let config = ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        };
        let api = HttpSearchSessionApi::new(ApiTransport::new(&config).unwrap());
        let cancel = CancellationToken::new();

        let sessions = api.list(&cancel).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert!(!sessions[0].is_finished());
        api.delete(9, &cancel).await.unwrap();

        list.assert_async().await;
        delete.assert_async().await;
    }
}
