//! The single-active-role exclusivity check.

use super::model::JobRole;
use crate::error::{Anomaly, Result};

/// Returns the active role of a freshly loaded collection, if any.
///
/// More than one active role is reported as [`Anomaly::MultipleActiveRoles`].
/// The collection is left as the server sent it: the client cannot know which
/// role the server meant to keep.
pub fn check_single_active(roles: &[JobRole]) -> Result<Option<&JobRole>> {
    let mut active = roles.iter().filter(|role| role.is_active);
    let first = active.next();
    if active.next().is_none() {
        return Ok(first);
    }

    let mut role_ids: Vec<i64> = roles
        .iter()
        .filter(|role| role.is_active)
        .map(|role| role.id)
        .collect();
    role_ids.sort_unstable();
    tracing::error!(?role_ids, "More than one job role is active");
    Err(Anomaly::MultipleActiveRoles { role_ids }.into())
}
