//! Job role domain model.
//!
//! A job role is a professional profile: a name plus the curriculum vitae the
//! search process scores opportunities against. At most one role is active.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// A professional profile identified by a server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    /// Surrogate id assigned by the server
    pub id: i64,
    /// Display name of the role
    pub name: String,
    /// Filename of the uploaded curriculum vitae
    pub cv_filename: Option<String>,
    /// Whether this is the role searches currently run for
    pub is_active: bool,
}

impl Resource for JobRole {
    type Key = i64;
    const KIND: &'static str = "job role";

    fn key(&self) -> &i64 {
        &self.id
    }
}

/// The server's view of which role is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRole {
    pub id: i64,
    pub name: String,
}
