//! Search session domain model.
//!
//! A search session records one run of the external search process. This
//! client only lists and deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSession {
    pub id: i64,
    pub start_datetime: DateTime<Utc>,
    /// Absent while the run is in progress or when it failed
    pub end_datetime: Option<DateTime<Utc>>,
    /// Minimum score an opportunity needed to be saved
    pub score_threshold: i64,
    pub log_file_path: Option<String>,
}

impl SearchSession {
    /// Whether the run reached its end.
    pub fn is_finished(&self) -> bool {
        self.end_datetime.is_some()
    }
}

impl Resource for SearchSession {
    type Key = i64;
    const KIND: &'static str = "search session";

    fn key(&self) -> &i64 {
        &self.id
    }
}
