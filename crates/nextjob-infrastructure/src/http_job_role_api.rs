//! Job role endpoints over HTTP.

use async_trait::async_trait;
use nextjob_core::job_role::{ActiveRole, JobRole, JobRoleApi, JobRoleUpdate, NewJobRole};
use nextjob_core::resource::ResourceSource;
use nextjob_core::{NextJobError, Result};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tokio_util::sync::CancellationToken;

use crate::dto::ActiveRoleDto;
use crate::transport::ApiTransport;

#[derive(Debug, Clone)]
pub struct HttpJobRoleApi {
    transport: ApiTransport,
}

impl HttpJobRoleApi {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    fn upload_form(role: &NewJobRole) -> Result<Form> {
        let document = role.document.as_ref().ok_or_else(|| {
            NextJobError::validation("cv_file", "Please upload a PDF curriculum vitae")
        })?;
        // Only a document that passed `CvDocument::validate` carries a type.
        let content_type = document.content_type.as_deref().ok_or_else(|| {
            NextJobError::validation("cv_file", "The curriculum vitae must be a PDF file")
        })?;

        let part = Part::bytes(document.bytes.clone())
            .file_name(document.filename.clone())
            .mime_str(content_type)
            .map_err(|e| NextJobError::validation("cv_file", e.to_string()))?;

        Ok(Form::new()
            .text("name", role.name.trim().to_string())
            .part("cv_file", part))
    }
}

#[async_trait]
impl ResourceSource<JobRole> for HttpJobRoleApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<JobRole>> {
        let request = self.transport.request(Method::GET, "/job-roles");
        self.transport.json(request, cancel).await
    }
}

#[async_trait]
impl JobRoleApi for HttpJobRoleApi {
    async fn get(&self, id: i64, cancel: &CancellationToken) -> Result<JobRole> {
        let request = self.transport.request(Method::GET, &format!("/job-roles/{id}"));
        self.transport.json(request, cancel).await
    }

    async fn create(&self, role: &NewJobRole, cancel: &CancellationToken) -> Result<()> {
        let form = Self::upload_form(role)?;
        let request = self
            .transport
            .request(Method::POST, "/job-roles")
            .multipart(form);
        self.transport.execute(request, cancel).await
    }

    async fn update(
        &self,
        id: i64,
        update: &JobRoleUpdate,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let request = self
            .transport
            .request(Method::PUT, &format!("/job-roles/{id}"))
            .json(update);
        self.transport.execute(request, cancel).await
    }

    async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<()> {
        let request = self
            .transport
            .request(Method::DELETE, &format!("/job-roles/{id}"));
        self.transport.execute(request, cancel).await
    }

    async fn download_cv(&self, id: i64, cancel: &CancellationToken) -> Result<Vec<u8>> {
        let request = self
            .transport
            .request(Method::GET, &format!("/job-roles/{id}/cv"));
        self.transport.bytes(request, cancel).await
    }

    async fn active_role(&self, cancel: &CancellationToken) -> Result<Option<ActiveRole>> {
        let request = self
            .transport
            .request(Method::GET, "/opportunities/active-role");
        let dto: ActiveRoleDto = self.transport.json(request, cancel).await?;
        Ok(dto.into_active_role())
    }
}
