//! Wire representations of the remote API's records.
//!
//! The server emits timestamps either with an offset (RFC 3339) or as naive
//! ISO-8601 values in UTC, so records carrying timestamps are decoded through
//! these DTOs before they become domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use nextjob_core::job_role::ActiveRole;
use nextjob_core::opportunity::{Opportunity, OpportunityStatus};
use nextjob_core::search_session::SearchSession;
use nextjob_core::watchlist::{PageType, WatchlistEntry};
use nextjob_core::{NextJobError, Result};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a server timestamp; values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| NextJobError::Serialization {
            format: "timestamp".to_string(),
            message: format!("unrecognised timestamp '{value}'"),
        })
}

fn parse_optional(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_timestamp).transpose()
}

#[derive(Debug, Deserialize)]
pub struct WatchlistEntryDto {
    pub url: String,
    pub job_role_id: i64,
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub page_type: Option<PageType>,
}

impl TryFrom<WatchlistEntryDto> for WatchlistEntry {
    type Error = NextJobError;

    fn try_from(dto: WatchlistEntryDto) -> Result<Self> {
        Ok(WatchlistEntry {
            url: dto.url,
            job_role_id: dto.job_role_id,
            last_visit: parse_optional(dto.last_visit)?,
            page_type: dto.page_type,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OpportunityDto {
    pub url: String,
    pub job_role_id: i64,
    pub score: u32,
    pub status: OpportunityStatus,
    pub last_update: String,
}

impl TryFrom<OpportunityDto> for Opportunity {
    type Error = NextJobError;

    fn try_from(dto: OpportunityDto) -> Result<Self> {
        Ok(Opportunity {
            url: dto.url,
            job_role_id: dto.job_role_id,
            score: dto.score,
            status: dto.status,
            last_update: parse_timestamp(&dto.last_update)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchSessionDto {
    pub id: i64,
    pub start_datetime: String,
    #[serde(default)]
    pub end_datetime: Option<String>,
    pub score_threshold: i64,
    #[serde(default)]
    pub log_file_path: Option<String>,
}

impl TryFrom<SearchSessionDto> for SearchSession {
    type Error = NextJobError;

    fn try_from(dto: SearchSessionDto) -> Result<Self> {
        Ok(SearchSession {
            id: dto.id,
            start_datetime: parse_timestamp(&dto.start_datetime)?,
            end_datetime: parse_optional(dto.end_datetime)?,
            score_threshold: dto.score_threshold,
            log_file_path: dto.log_file_path,
        })
    }
}

/// Body of `GET /opportunities/active-role`; both members are null when no
/// role is active.
#[derive(Debug, Deserialize)]
pub struct ActiveRoleDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub active_role: Option<String>,
}

impl ActiveRoleDto {
    pub fn into_active_role(self) -> Option<ActiveRole> {
        let name = self.active_role.unwrap_or_default();
        self.id.map(|id| ActiveRole { id, name })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateDto {
    pub status: OpportunityStatus,
}

/// Converts every element, failing on the first record that does not decode.
pub fn convert_all<D, T>(items: Vec<D>) -> Result<Vec<T>>
where
    T: TryFrom<D, Error = NextJobError>,
{
    items.into_iter().map(T::try_from).collect()
}
