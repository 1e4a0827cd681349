//! Opportunity domain model.
//!
//! An opportunity is a job posting found for a role, identified by its URL
//! and scored against the role's curriculum vitae.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::request::NewOpportunity;
use crate::resource::{NaturalKeyResource, Resource};

/// Triage state of an opportunity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum OpportunityStatus {
    /// Not looked at yet
    New,
    /// Dismissed by the user
    Ignore,
}

impl Default for OpportunityStatus {
    fn default() -> Self {
        OpportunityStatus::New
    }
}

/// A discovered job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Posting URL, unique across opportunities
    pub url: String,
    pub job_role_id: i64,
    /// Match score against the role's CV
    pub score: u32,
    pub status: OpportunityStatus,
    /// Assigned by the server on every change
    pub last_update: DateTime<Utc>,
}

/// Everything an opportunity carries besides its URL and server timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityFields {
    pub job_role_id: i64,
    pub score: u32,
    pub status: OpportunityStatus,
}

impl Resource for Opportunity {
    type Key = String;
    const KIND: &'static str = "opportunity";

    fn key(&self) -> &String {
        &self.url
    }
}

impl NaturalKeyResource for Opportunity {
    type Fields = OpportunityFields;
    type Draft = NewOpportunity;

    fn fields(&self) -> OpportunityFields {
        OpportunityFields {
            job_role_id: self.job_role_id,
            score: self.score,
            status: self.status,
        }
    }

    fn draft(url: &str, fields: OpportunityFields) -> NewOpportunity {
        NewOpportunity {
            url: url.to_string(),
            job_role_id: fields.job_role_id,
            score: i64::from(fields.score),
            status: fields.status,
        }
    }
}
