//! Opportunity creation request.

use serde::{Deserialize, Serialize};

use super::model::OpportunityStatus;
use crate::error::{NextJobError, Result};
use crate::watchlist::validate_url;

/// Request body for recording an opportunity by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOpportunity {
    pub url: String,
    pub job_role_id: i64,
    /// Kept signed so a negative input can be rejected instead of wrapped
    pub score: i64,
    #[serde(default)]
    pub status: OpportunityStatus,
}

impl NewOpportunity {
    pub fn new(url: impl Into<String>, job_role_id: i64, score: i64) -> Self {
        Self {
            url: url.into(),
            job_role_id,
            score,
            status: OpportunityStatus::New,
        }
    }

    pub fn with_status(mut self, status: OpportunityStatus) -> Self {
        self.status = status;
        self
    }

    /// Trims the URL and checks the score is not negative.
    pub fn validate(mut self) -> Result<Self> {
        self.url = validate_url(&self.url)?;
        if self.score < 0 || self.score > i64::from(u32::MAX) {
            return Err(NextJobError::validation(
                "score",
                "Please enter a valid score (bigger or equal to 0)",
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_status_new() {
        let opp = NewOpportunity::new("https://acme.example/jobs/1", 1, 90);
        assert_eq!(opp.status, OpportunityStatus::New);
    }

    #[test]
    fn test_validate_negative_score() {
        let err = NewOpportunity::new("https://acme.example/jobs/1", 1, -1)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please enter a valid score (bigger or equal to 0)"
        );
    }

    #[test]
    fn test_validate_zero_score_and_blank_url() {
        assert!(NewOpportunity::new("https://acme.example/jobs/1", 1, 0).validate().is_ok());
        let err = NewOpportunity::new(" ", 1, 10).validate().unwrap_err();
        assert_eq!(err.user_message(), "Please enter a URL");
    }
}
