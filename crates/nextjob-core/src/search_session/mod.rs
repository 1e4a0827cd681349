//! Search session domain module.

mod api;
mod model;

pub use api::SearchSessionApi;
pub use model::SearchSession;
