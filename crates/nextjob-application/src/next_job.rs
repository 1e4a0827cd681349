//! Entry point wiring every collection's store and coordinator together.

use std::sync::Arc;

use nextjob_core::Result;
use nextjob_core::config::ApiConfig;
use nextjob_core::job_role::JobRoleApi;
use nextjob_core::opportunity::OpportunityApi;
use nextjob_core::resource::NaturalKeyApi;
use nextjob_core::search_session::SearchSessionApi;
use nextjob_core::watchlist::WatchlistEntry;
use nextjob_infrastructure::HttpApis;

use crate::coordinator::{
    JobRoleCoordinator, OpportunityCoordinator, SearchSessionCoordinator, WatchlistCoordinator,
};

/// The client core a front end talks to.
pub struct NextJob {
    pub job_roles: JobRoleCoordinator,
    pub watchlist: WatchlistCoordinator,
    pub opportunities: OpportunityCoordinator,
    pub search_sessions: SearchSessionCoordinator,
}

impl NextJob {
    pub fn new<J, W, O, S>(
        job_roles: Arc<J>,
        watchlist: Arc<W>,
        opportunities: Arc<O>,
        search_sessions: Arc<S>,
    ) -> Self
    where
        J: JobRoleApi + 'static,
        W: NaturalKeyApi<WatchlistEntry> + 'static,
        O: OpportunityApi + 'static,
        S: SearchSessionApi + 'static,
    {
        let job_roles = JobRoleCoordinator::new(job_roles);
        let roles = job_roles.api();
        Self {
            watchlist: WatchlistCoordinator::new(watchlist, Arc::clone(&roles)),
            opportunities: OpportunityCoordinator::new(opportunities, roles),
            search_sessions: SearchSessionCoordinator::new(search_sessions),
            job_roles,
        }
    }

    /// Connects to the HTTP API described by `config`.
    pub fn connect(config: &ApiConfig) -> Result<Self> {
        let apis = HttpApis::new(config)?;
        Ok(Self::new(
            Arc::new(apis.job_roles),
            Arc::new(apis.watchlist),
            Arc::new(apis.opportunities),
            Arc::new(apis.search_sessions),
        ))
    }
}
