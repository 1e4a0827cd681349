//! In-memory stand-ins for the remote API, with failure injection.
#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use nextjob_application::NextJob;
use nextjob_core::job_role::{ActiveRole, JobRole, JobRoleApi, JobRoleUpdate, NewJobRole};
use nextjob_core::opportunity::{NewOpportunity, Opportunity, OpportunityApi, OpportunityStatus};
use nextjob_core::resource::{NaturalKeyApi, NaturalKeyResource, ResourceSource};
use nextjob_core::search_session::{SearchSession, SearchSessionApi};
use nextjob_core::watchlist::{NewWatchlistEntry, PageType, WatchlistEntry};
use nextjob_core::{NextJobError, Result};
use tokio_util::sync::CancellationToken;

fn check(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(NextJobError::Cancelled)
    } else {
        Ok(())
    }
}

pub fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, minute, 0).unwrap()
}

// ============================================================================
// URL-keyed collections
// ============================================================================

/// A URL-keyed collection that rejects duplicate keys with 409 like the server.
pub struct FakeNaturalKeyApi<R: NaturalKeyResource> {
    records: Mutex<BTreeMap<String, R>>,
    build: fn(&R::Draft, DateTime<Utc>) -> R,
    clock: Mutex<DateTime<Utc>>,
    /// Consumed one per create call
    pub create_failures: Mutex<VecDeque<NextJobError>>,
    pub delete_failures: Mutex<VecDeque<NextJobError>>,
    pub list_failure: Mutex<Option<NextJobError>>,
    pub delete_all_failure: Mutex<Option<NextJobError>>,
    /// Cancelled as soon as a delete has been applied. Like the HTTP
    /// transport, the delete then reports `Cancelled` if it was sent on
    /// that same token.
    pub cancel_on_delete: Mutex<Option<CancellationToken>>,
    pub calls: Mutex<Vec<String>>,
}

impl<R: NaturalKeyResource> FakeNaturalKeyApi<R> {
    fn with_builder(build: fn(&R::Draft, DateTime<Utc>) -> R, records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|record| (record.key().clone(), record))
                    .collect(),
            ),
            build,
            clock: Mutex::new(at(30)),
            create_failures: Mutex::new(VecDeque::new()),
            delete_failures: Mutex::new(VecDeque::new()),
            list_failure: Mutex::new(None),
            delete_all_failure: Mutex::new(None),
            cancel_on_delete: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }

    pub fn record(&self, key: &str) -> Option<R> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_next_create(&self, error: NextJobError) {
        self.create_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_lists(&self, error: Option<NextJobError>) {
        *self.list_failure.lock().unwrap() = error;
    }

    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().unwrap();
        *clock += Duration::minutes(1);
        *clock
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl<R: NaturalKeyResource> ResourceSource<R> for FakeNaturalKeyApi<R> {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<R>> {
        check(cancel)?;
        self.log("list".to_string());
        if let Some(error) = self.list_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl<R: NaturalKeyResource> NaturalKeyApi<R> for FakeNaturalKeyApi<R> {
    async fn create(&self, draft: &R::Draft, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        let record = (self.build)(draft, self.tick());
        let key = record.key().clone();
        self.log(format!("create {key}"));
        if let Some(error) = self.create_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&key) {
            return Err(NextJobError::server(409, Some(format!("{key} already exists"))));
        }
        records.insert(key, record);
        Ok(())
    }

    async fn delete(&self, url: &str, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        self.log(format!("delete {url}"));
        if let Some(error) = self.delete_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        if self.records.lock().unwrap().remove(url).is_none() {
            return Err(NextJobError::server(404, Some(format!("{url} not found"))));
        }
        if let Some(token) = self.cancel_on_delete.lock().unwrap().as_ref() {
            token.cancel();
        }
        check(cancel)
    }
}

#[async_trait]
impl OpportunityApi for FakeNaturalKeyApi<Opportunity> {
    async fn update_status(
        &self,
        url: &str,
        status: OpportunityStatus,
        cancel: &CancellationToken,
    ) -> Result<Opportunity> {
        check(cancel)?;
        self.log(format!("update_status {url}"));
        let now = self.tick();
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(url)
            .ok_or_else(|| NextJobError::server(404, Some("Opportunity not found".to_string())))?;
        record.status = status;
        record.last_update = now;
        Ok(record.clone())
    }

    async fn delete_all(&self, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        self.log("delete_all".to_string());
        if let Some(error) = self.delete_all_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

pub fn watchlist_api(entries: Vec<WatchlistEntry>) -> FakeNaturalKeyApi<WatchlistEntry> {
    FakeNaturalKeyApi::with_builder(
        |draft: &NewWatchlistEntry, _now: DateTime<Utc>| WatchlistEntry {
            url: draft.url.clone(),
            job_role_id: draft.job_role_id,
            last_visit: draft.last_visit,
            page_type: draft.page_type.clone(),
        },
        entries,
    )
}

pub fn opportunity_api(opportunities: Vec<Opportunity>) -> FakeNaturalKeyApi<Opportunity> {
    FakeNaturalKeyApi::with_builder(
        |draft: &NewOpportunity, now: DateTime<Utc>| Opportunity {
            url: draft.url.clone(),
            job_role_id: draft.job_role_id,
            score: u32::try_from(draft.score).unwrap_or_default(),
            status: draft.status,
            last_update: now,
        },
        opportunities,
    )
}

pub fn entry(url: &str, role: i64, last_visit: Option<DateTime<Utc>>) -> WatchlistEntry {
    WatchlistEntry {
        url: url.to_string(),
        job_role_id: role,
        last_visit,
        page_type: Some(PageType::Ashbyhq),
    }
}

pub fn opportunity(url: &str, score: u32, status: OpportunityStatus) -> Opportunity {
    Opportunity {
        url: url.to_string(),
        job_role_id: 1,
        score,
        status,
        last_update: at(0),
    }
}

// ============================================================================
// Job roles
// ============================================================================

pub struct FakeJobRoleApi {
    roles: Mutex<BTreeMap<i64, JobRole>>,
    next_id: Mutex<i64>,
    /// Whether activating a role deactivates the others
    exclusive: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeJobRoleApi {
    pub fn new(roles: Vec<JobRole>, exclusive: bool) -> Self {
        let next_id = roles.iter().map(|role| role.id).max().unwrap_or(0) + 1;
        Self {
            roles: Mutex::new(roles.into_iter().map(|role| (role.id, role)).collect()),
            next_id: Mutex::new(next_id),
            exclusive,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn role(&self, id: i64) -> Option<JobRole> {
        self.roles.lock().unwrap().get(&id).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn missing(id: i64) -> NextJobError {
        NextJobError::server(404, Some(format!("Job role {id} not found")))
    }
}

#[async_trait]
impl ResourceSource<JobRole> for FakeJobRoleApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<JobRole>> {
        check(cancel)?;
        self.log("list".to_string());
        Ok(self.roles.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl JobRoleApi for FakeJobRoleApi {
    async fn get(&self, id: i64, cancel: &CancellationToken) -> Result<JobRole> {
        check(cancel)?;
        self.log(format!("get {id}"));
        self.role(id).ok_or_else(|| Self::missing(id))
    }

    async fn create(&self, role: &NewJobRole, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        self.log("create".to_string());
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;
        self.roles.lock().unwrap().insert(
            id,
            JobRole {
                id,
                name: role.name.trim().to_string(),
                cv_filename: role.document.as_ref().map(|doc| doc.filename.clone()),
                is_active: false,
            },
        );
        Ok(())
    }

    async fn update(
        &self,
        id: i64,
        update: &JobRoleUpdate,
        cancel: &CancellationToken,
    ) -> Result<()> {
        check(cancel)?;
        self.log(format!("update {id}"));
        let mut roles = self.roles.lock().unwrap();
        if !roles.contains_key(&id) {
            return Err(Self::missing(id));
        }
        if update.is_active == Some(true) && self.exclusive {
            for role in roles.values_mut() {
                role.is_active = false;
            }
        }
        if let Some(role) = roles.get_mut(&id) {
            if let Some(name) = &update.name {
                role.name = name.clone();
            }
            if let Some(is_active) = update.is_active {
                role.is_active = is_active;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        self.log(format!("delete {id}"));
        self.roles
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing(id))
    }

    async fn download_cv(&self, id: i64, cancel: &CancellationToken) -> Result<Vec<u8>> {
        check(cancel)?;
        self.role(id)
            .map(|_| format!("%PDF-1.7 cv of role {id}").into_bytes())
            .ok_or_else(|| Self::missing(id))
    }

    async fn active_role(&self, cancel: &CancellationToken) -> Result<Option<ActiveRole>> {
        check(cancel)?;
        self.log("active_role".to_string());
        Ok(self
            .roles
            .lock()
            .unwrap()
            .values()
            .find(|role| role.is_active)
            .map(|role| ActiveRole {
                id: role.id,
                name: role.name.clone(),
            }))
    }
}

pub fn role(id: i64, name: &str, is_active: bool) -> JobRole {
    JobRole {
        id,
        name: name.to_string(),
        cv_filename: Some(format!("cv-{id}.pdf")),
        is_active,
    }
}

// ============================================================================
// Search sessions
// ============================================================================

pub struct FakeSearchSessionApi {
    sessions: Mutex<BTreeMap<i64, SearchSession>>,
}

impl FakeSearchSessionApi {
    pub fn new(sessions: Vec<SearchSession>) -> Self {
        Self {
            sessions: Mutex::new(sessions.into_iter().map(|s| (s.id, s)).collect()),
        }
    }
}

#[async_trait]
impl ResourceSource<SearchSession> for FakeSearchSessionApi {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<SearchSession>> {
        check(cancel)?;
        Ok(self.sessions.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl SearchSessionApi for FakeSearchSessionApi {
    async fn delete(&self, id: i64, cancel: &CancellationToken) -> Result<()> {
        check(cancel)?;
        self.sessions
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| NextJobError::server(404, None))
    }
}

pub fn session(id: i64, start_minute: u32, finished: bool) -> SearchSession {
    SearchSession {
        id,
        start_datetime: at(start_minute),
        end_datetime: finished.then(|| at(start_minute + 5)),
        score_threshold: 80,
        log_file_path: finished.then(|| format!("logs/session-{id}.log")),
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub app: NextJob,
    pub roles: Arc<FakeJobRoleApi>,
    pub watchlist: Arc<FakeNaturalKeyApi<WatchlistEntry>>,
    pub opportunities: Arc<FakeNaturalKeyApi<Opportunity>>,
    pub sessions: Arc<FakeSearchSessionApi>,
}

impl Harness {
    pub fn new(
        roles: FakeJobRoleApi,
        watchlist: Vec<WatchlistEntry>,
        opportunities: Vec<Opportunity>,
        sessions: Vec<SearchSession>,
    ) -> Self {
        let roles = Arc::new(roles);
        let watchlist = Arc::new(watchlist_api(watchlist));
        let opportunities = Arc::new(opportunity_api(opportunities));
        let sessions = Arc::new(FakeSearchSessionApi::new(sessions));
        let app = NextJob::new(
            Arc::clone(&roles),
            Arc::clone(&watchlist),
            Arc::clone(&opportunities),
            Arc::clone(&sessions),
        );
        Self {
            app,
            roles,
            watchlist,
            opportunities,
            sessions,
        }
    }

    /// One active role (id 1) and one inactive role (id 2).
    pub fn with_active_role() -> Self {
        Self::new(
            FakeJobRoleApi::new(
                vec![role(1, "Backend Engineer", true), role(2, "Data Engineer", false)],
                true,
            ),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }
}
