//! Watchlist domain model.
//!
//! The watchlist holds company career pages the search process visits. Each
//! entry is identified by its URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::request::NewWatchlistEntry;
use crate::resource::{NaturalKeyResource, Resource};

/// How a career page is parsed by the search process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageType {
    /// Job boards hosted on AshbyHQ
    Ashbyhq,
    /// Any page type this client does not know about, kept verbatim
    Other(String),
}

impl PageType {
    pub fn as_str(&self) -> &str {
        match self {
            PageType::Ashbyhq => "ashbyhq",
            PageType::Other(value) => value,
        }
    }
}

impl From<String> for PageType {
    fn from(value: String) -> Self {
        if value == "ashbyhq" {
            PageType::Ashbyhq
        } else {
            PageType::Other(value)
        }
    }
}

impl From<PageType> for String {
    fn from(value: PageType) -> Self {
        match value {
            PageType::Ashbyhq => "ashbyhq".to_string(),
            PageType::Other(value) => value,
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company career page being monitored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Career page URL, unique across the watchlist
    pub url: String,
    /// The job role the page is watched for
    pub job_role_id: i64,
    /// When the search process last visited the page
    pub last_visit: Option<DateTime<Utc>>,
    pub page_type: Option<PageType>,
}

/// Everything a watchlist entry carries besides its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistFields {
    pub job_role_id: i64,
    pub last_visit: Option<DateTime<Utc>>,
    pub page_type: Option<PageType>,
}

/// What happens to `last_visit` when an entry moves to a new URL.
///
/// A different URL may be a different page, so some callers want the search
/// process to treat it as never visited. Others only fix a typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastVisitPolicy {
    Preserve,
    Reset,
}

impl WatchlistFields {
    pub fn apply(mut self, policy: LastVisitPolicy) -> Self {
        if policy == LastVisitPolicy::Reset {
            self.last_visit = None;
        }
        self
    }
}

impl Resource for WatchlistEntry {
    type Key = String;
    const KIND: &'static str = "watchlist entry";

    fn key(&self) -> &String {
        &self.url
    }
}

impl NaturalKeyResource for WatchlistEntry {
    type Fields = WatchlistFields;
    type Draft = NewWatchlistEntry;

    fn fields(&self) -> WatchlistFields {
        WatchlistFields {
            job_role_id: self.job_role_id,
            last_visit: self.last_visit,
            page_type: self.page_type.clone(),
        }
    }

    fn draft(url: &str, fields: WatchlistFields) -> NewWatchlistEntry {
        NewWatchlistEntry {
            url: url.to_string(),
            job_role_id: fields.job_role_id,
            last_visit: fields.last_visit,
            page_type: fields.page_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> WatchlistEntry {
        WatchlistEntry {
            url: "https://jobs.ashbyhq.com/acme".to_string(),
            job_role_id: 7,
            last_visit: Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()),
            page_type: Some(PageType::Ashbyhq),
        }
    }

    #[test]
    fn test_page_type_round_trips_unknown_values() {
        let known: PageType = serde_json::from_str("\"ashbyhq\"").unwrap();
        assert_eq!(known, PageType::Ashbyhq);

        let other: PageType = serde_json::from_str("\"greenhouse\"").unwrap();
        assert_eq!(other, PageType::Other("greenhouse".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"greenhouse\"");
    }

    #[test]
    fn test_page_type_keeps_unexpected_casing() {
        let mixed: PageType = serde_json::from_str("\"AshbyHQ\"").unwrap();
        assert_eq!(mixed, PageType::Other("AshbyHQ".to_string()));
        assert_eq!(serde_json::to_string(&mixed).unwrap(), "\"AshbyHQ\"");
    }

    #[test]
    fn test_last_visit_policy() {
        let fields = entry().fields();
        assert!(fields.clone().apply(LastVisitPolicy::Preserve).last_visit.is_some());

        let reset = fields.apply(LastVisitPolicy::Reset);
        assert_eq!(reset.last_visit, None);
        assert_eq!(reset.page_type, Some(PageType::Ashbyhq));
        assert_eq!(reset.job_role_id, 7);
    }

    #[test]
    fn test_draft_carries_fields_to_new_url() {
        let draft = WatchlistEntry::draft("https://acme.example/careers", entry().fields());
        assert_eq!(draft.url, "https://acme.example/careers");
        assert_eq!(draft.job_role_id, 7);
        assert_eq!(draft.page_type, Some(PageType::Ashbyhq));
        assert!(draft.last_visit.is_some());
    }
}
