//! HTTP implementations of the remote API traits, plus configuration loading.

pub mod config_service;
pub mod dto;
pub mod http_job_role_api;
pub mod http_opportunity_api;
pub mod http_search_session_api;
pub mod http_watchlist_api;
pub mod paths;
pub mod transport;

pub use crate::config_service::ConfigService;
pub use crate::http_job_role_api::HttpJobRoleApi;
pub use crate::http_opportunity_api::HttpOpportunityApi;
pub use crate::http_search_session_api::HttpSearchSessionApi;
pub use crate::http_watchlist_api::HttpWatchlistApi;
pub use crate::transport::ApiTransport;

use nextjob_core::Result;
use nextjob_core::config::ApiConfig;

/// One HTTP client per collection, sharing a single connection pool.
#[derive(Debug, Clone)]
pub struct HttpApis {
    pub job_roles: HttpJobRoleApi,
    pub watchlist: HttpWatchlistApi,
    pub opportunities: HttpOpportunityApi,
    pub search_sessions: HttpSearchSessionApi,
}

impl HttpApis {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let transport = ApiTransport::new(config)?;
        Ok(Self {
            job_roles: HttpJobRoleApi::new(transport.clone()),
            watchlist: HttpWatchlistApi::new(transport.clone()),
            opportunities: HttpOpportunityApi::new(transport.clone()),
            search_sessions: HttpSearchSessionApi::new(transport),
        })
    }
}
