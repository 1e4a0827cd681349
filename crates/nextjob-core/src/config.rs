use serde::{Deserialize, Serialize};

use crate::opportunity::OpportunityStatus;
use crate::view::{SortOrder, StatusFilter};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Contents of `config.toml`. Every section and key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub api: ApiConfig,
    pub view: ViewConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound for a whole request, response body included
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Initial list ordering and filtering used by front ends.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub watchlist_order: SortOrder,
    pub session_order: SortOrder,
    pub opportunity_statuses: Vec<OpportunityStatus>,
}

impl ViewConfig {
    pub fn status_filter(&self) -> StatusFilter {
        StatusFilter::only(self.opportunity_statuses.iter().copied())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            watchlist_order: SortOrder::Ascending,
            session_order: SortOrder::Descending,
            opportunity_statuses: StatusFilter::all().statuses().collect(),
        }
    }
}
