//! Job role creation and update request models.

use serde::{Deserialize, Serialize};

use crate::error::{NextJobError, Result};

/// The only document format the server accepts for a curriculum vitae.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A curriculum vitae ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvDocument {
    pub filename: String,
    /// Content type reported by whoever picked the file, if known
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl CvDocument {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// Checks the document is a PDF before anything is sent.
    pub fn validate(&self) -> Result<()> {
        match self.content_type.as_deref() {
            Some(content_type) if content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE) => Ok(()),
            _ => Err(NextJobError::validation(
                "cv_file",
                "The curriculum vitae must be a PDF file",
            )),
        }
    }
}

/// Request to create a new job role (multipart: name + document).
#[derive(Debug, Clone)]
pub struct NewJobRole {
    pub name: String,
    pub document: Option<CvDocument>,
}

impl NewJobRole {
    pub fn new(name: impl Into<String>, document: CvDocument) -> Self {
        Self {
            name: name.into(),
            document: Some(document),
        }
    }

    /// Validate the request: a non-blank name and a PDF document.
    pub fn validate(&self) -> Result<()> {
        validate_role_name(&self.name)?;
        match &self.document {
            None => Err(NextJobError::validation(
                "cv_file",
                "Please upload a PDF curriculum vitae",
            )),
            Some(document) => document.validate(),
        }
    }
}

/// Partial update of a job role. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl JobRoleUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_active: None,
        }
    }

    pub fn activate() -> Self {
        Self {
            name: None,
            is_active: Some(true),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_role_name(name)?;
        }
        Ok(())
    }
}

fn validate_role_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(NextJobError::validation(
            "name",
            "Job role name cannot be empty",
        ));
    }
    Ok(())
}
