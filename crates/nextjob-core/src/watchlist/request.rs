//! Watchlist creation request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::PageType;
use crate::error::{NextJobError, Result};

/// Request body for adding a career page to the watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWatchlistEntry {
    pub url: String,
    pub job_role_id: i64,
    /// New entries have never been visited
    #[serde(default)]
    pub last_visit: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page_type: Option<PageType>,
}

impl NewWatchlistEntry {
    /// A never-visited entry for the given role.
    pub fn new(url: impl Into<String>, job_role_id: i64, page_type: Option<PageType>) -> Self {
        Self {
            url: url.into(),
            job_role_id,
            last_visit: None,
            page_type,
        }
    }

    /// Trims the URL and rejects a blank one.
    pub fn validate(mut self) -> Result<Self> {
        self.url = validate_url(&self.url)?;
        Ok(self)
    }
}

/// Returns the trimmed URL, or a validation error when nothing is left.
pub fn validate_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(NextJobError::validation("url", "Please enter a URL"));
    }
    Ok(trimmed.to_string())
}
