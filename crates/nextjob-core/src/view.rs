//! Read views over loaded snapshots.
//!
//! Every projection is a pure function of (records, filter, sort order). Nothing
//! is cached; callers recompute after each reload. Sorts always end on the
//! record's key, so each one is a strict total order and the output does not
//! depend on the order the server returned records in.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::job_role::JobRole;
use crate::opportunity::{Opportunity, OpportunityStatus};
use crate::search_session::SearchSession;
use crate::watchlist::WatchlistEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// The set of opportunity statuses a view keeps.
///
/// An empty set keeps nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilter(BTreeSet<OpportunityStatus>);

impl StatusFilter {
    pub fn all() -> Self {
        Self(OpportunityStatus::iter().collect())
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn only(statuses: impl IntoIterator<Item = OpportunityStatus>) -> Self {
        Self(statuses.into_iter().collect())
    }

    pub fn contains(&self, status: OpportunityStatus) -> bool {
        self.0.contains(&status)
    }

    /// Adds the status if missing, removes it otherwise.
    pub fn toggle(&mut self, status: OpportunityStatus) {
        if !self.0.remove(&status) {
            self.0.insert(status);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn statuses(&self) -> impl Iterator<Item = OpportunityStatus> + '_ {
        self.0.iter().copied()
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunitySortField {
    #[default]
    Url,
    Score,
    LastUpdate,
}

/// Filter and sort settings for the opportunity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityView {
    pub statuses: StatusFilter,
    pub sort_by: OpportunitySortField,
    pub order: SortOrder,
}

impl Default for OpportunityView {
    fn default() -> Self {
        Self {
            statuses: StatusFilter::all(),
            sort_by: OpportunitySortField::Url,
            order: SortOrder::Ascending,
        }
    }
}

/// Derives ordered, filtered views from snapshot contents.
pub struct ViewProjector;

impl ViewProjector {
    /// Career pages by URL.
    pub fn watchlist(entries: &[WatchlistEntry], order: SortOrder) -> Vec<&WatchlistEntry> {
        project(entries, |_| true, |a, b| a.url.cmp(&b.url), order)
    }

    /// Opportunities whose status is selected, sorted on the chosen field.
    pub fn opportunities<'a>(
        opportunities: &'a [Opportunity],
        view: &OpportunityView,
    ) -> Vec<&'a Opportunity> {
        let by_field = |a: &Opportunity, b: &Opportunity| match view.sort_by {
            OpportunitySortField::Url => Ordering::Equal,
            OpportunitySortField::Score => a.score.cmp(&b.score),
            OpportunitySortField::LastUpdate => a.last_update.cmp(&b.last_update),
        };
        project(
            opportunities,
            |opportunity| view.statuses.contains(opportunity.status),
            |a, b| by_field(a, b).then_with(|| a.url.cmp(&b.url)),
            view.order,
        )
    }

    /// Job roles by name, then id.
    pub fn job_roles(roles: &[JobRole], order: SortOrder) -> Vec<&JobRole> {
        project(
            roles,
            |_| true,
            |a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
            order,
        )
    }

    /// Search sessions by start time, then id.
    pub fn search_sessions(sessions: &[SearchSession], order: SortOrder) -> Vec<&SearchSession> {
        project(
            sessions,
            |_| true,
            |a, b| {
                a.start_datetime
                    .cmp(&b.start_datetime)
                    .then(a.id.cmp(&b.id))
            },
            order,
        )
    }
}

fn project<'a, R>(
    items: &'a [R],
    keep: impl Fn(&R) -> bool,
    compare: impl Fn(&R, &R) -> Ordering,
    order: SortOrder,
) -> Vec<&'a R> {
    let mut view: Vec<&R> = items.iter().filter(|item| keep(item)).collect();
    view.sort_by(|a, b| order.apply(compare(a, b)));
    view
}
