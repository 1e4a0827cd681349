//! Opportunity domain module.

mod api;
mod model;
mod request;

pub use api::OpportunityApi;
pub use model::{Opportunity, OpportunityFields, OpportunityStatus};
pub use request::NewOpportunity;
