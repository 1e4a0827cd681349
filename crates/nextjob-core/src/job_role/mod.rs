//! Job role domain module.
//!
//! # Module Structure
//!
//! - `model`: `JobRole` and the `ActiveRole` lookup result
//! - `request`: creation/update requests and their validation
//! - `api`: remote API trait
//! - `invariant`: the at-most-one-active check run after every reload

mod api;
mod invariant;
mod model;
mod request;

pub use api::JobRoleApi;
pub use invariant::check_single_active;
pub use model::{ActiveRole, JobRole};
pub use request::{CvDocument, JobRoleUpdate, NewJobRole, PDF_CONTENT_TYPE};
