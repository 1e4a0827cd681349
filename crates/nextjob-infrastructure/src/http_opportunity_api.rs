//! Opportunity endpoints over HTTP.

use async_trait::async_trait;
use nextjob_core::Result;
use nextjob_core::opportunity::{NewOpportunity, Opportunity, OpportunityApi, OpportunityStatus};
use nextjob_core::resource::{NaturalKeyApi, ResourceSource};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::dto::{OpportunityDto, StatusUpdateDto, convert_all};
use crate::transport::ApiTransport;

#[derive(Debug, Clone)]
pub struct HttpOpportunityApi {
    transport: ApiTransport,
}

impl HttpOpportunityApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ResourceSource<Opportunity> for HttpOpportunityApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Opportunity>> {
        let request = self.transport.request(Method::GET, "/opportunities");
        let dtos: Vec<OpportunityDto> = self.transport.json(request, cancel).await?;
        convert_all(dtos)
    }
}

#[async_trait]
impl NaturalKeyApi<Opportunity> for HttpOpportunityApi {
    async fn create(&self, draft: &NewOpportunity, cancel: &CancellationToken) -> Result<()> {
        let request = self
            .transport
            .request(Method::POST, "/opportunities")
            .json(draft);
        self.transport.execute(request, cancel).await
    }

    async fn delete(&self, url: &str, cancel: &CancellationToken) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, "/opportunities")
            .query(&[("url", url)]);
        self.transport.execute(request, cancel).await
    }
}

#[async_trait]
impl OpportunityApi for HttpOpportunityApi {
    async fn update_status(
        &self,
        url: &str,
        status: OpportunityStatus,
        cancel: &CancellationToken,
    ) -> Result<Opportunity> {
        let request = self
            .transport
            .request(Method::PUT, "/opportunities")
            .query(&[("url", url)])
            .json(&StatusUpdateDto { status });
        let dto: OpportunityDto = self.transport.json(request, cancel).await?;
        Opportunity::try_from(dto)
    }

    async fn delete_all(&self, cancel: &CancellationToken) -> Result<()> {
        let request = self.transport.request(Method::DELETE, "/opportunities/all");
        self.transport.execute(request, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use nextjob_core::config::ApiConfig;

    fn api(base_url: String) -> HttpOpportunityApi {
        let config = ApiConfig {
            base_url,
            ..ApiConfig::default()
        };
        HttpOpportunityApi::new(ApiTransport::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_update_status_returns_server_record() {
        let url = "https://acme.example/jobs/42?ref=board";
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/opportunities")
            .match_query(Matcher::UrlEncoded("url".to_string(), url.to_string()))
            .match_body(Matcher::Json(serde_json::json!({ "status": "Ignore" })))
            .with_status(200)
            .with_body(format!(
                r#"{{"url":"{url}","job_role_id":1,"score":88,"status":"Ignore","last_update":"2025-05-10T14:00:00Z"}}"#
            ))
            .create_async()
            .await;

        let updated = api(server.url())
            .update_status(url, OpportunityStatus::Ignore, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(updated.url, url);
        assert_eq!(updated.status, OpportunityStatus::Ignore);
        assert_eq!(updated.score, 88);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_sends_default_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/opportunities")
            .match_body(Matcher::Json(serde_json::json!({
                "url": "https://acme.example/jobs/1",
                "job_role_id": 2,
                "score": 75,
                "status": "New",
            })))
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let draft = NewOpportunity::new("https://acme.example/jobs/1", 2, 75);
        api(server.url())
            .create(&draft, &CancellationToken::new())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_all_uses_dedicated_path() {
        let mut server = Server::new_async().await;
        let bulk = server
            .mock("DELETE", "/opportunities/all")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let single = server
            .mock("DELETE", "/opportunities")
            .expect(0)
            .create_async()
            .await;

        api(server.url())
            .delete_all(&CancellationToken::new())
            .await
            .unwrap();

        bulk.assert_async().await;
        single.assert_async().await;
    }
}
