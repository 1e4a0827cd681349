pub mod opportunities;
pub mod roles;
pub mod sessions;
pub mod watchlist;

use clap::ValueEnum;
use nextjob_application::NextJob;
use nextjob_core::NextJobError;
use nextjob_core::config::ViewConfig;
use nextjob_core::view::SortOrder;
use tokio_util::sync::CancellationToken;

use crate::output;

/// Everything a command needs: the client core, view defaults and the
/// token cancelled on Ctrl-C.
pub struct Context {
    pub app: NextJob,
    pub view: ViewConfig,
    pub cancel: CancellationToken,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

/// Explains what a failed rename left behind before handing the error on.
pub fn rename_failed(err: NextJobError) -> anyhow::Error {
    match &err {
        NextJobError::RenameRolledBack { old_key, .. } => {
            output::print_warning(&format!("Rename failed, {old_key} was restored"));
        }
        NextJobError::ConsistencyAnomaly(_) => {
            output::print_warning("Rename failed and the original record could not be restored");
        }
        _ => {}
    }
    err.into()
}
