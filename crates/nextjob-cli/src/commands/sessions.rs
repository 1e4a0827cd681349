use anyhow::Result;
use clap::Subcommand;
use nextjob_core::view::ViewProjector;

use super::{Context, OrderArg};
use crate::output;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List search sessions by start time
    List {
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
    /// Delete a search session record
    Delete { id: i64 },
}

pub async fn execute(action: SessionAction, ctx: &Context) -> Result<()> {
    let sessions = &ctx.app.search_sessions;

    match action {
        SessionAction::List { order } => {
            let snapshot = sessions.load(&ctx.cancel).await?;
            if snapshot.is_empty() {
                println!("No search sessions");
            }
            let order = order.map(Into::into).unwrap_or(ctx.view.session_order);
            let rows = ViewProjector::search_sessions(snapshot.items(), order);
            for session in &rows {
                println!(
                    "{:>4}  {}  {:<16} {:<8} {:>4}  {}",
                    session.id,
                    output::timestamp(session.start_datetime),
                    output::end_time(session.end_datetime),
                    output::session_state(session),
                    session.score_threshold,
                    output::or_na(session.log_file_path.as_deref())
                );
            }
            println!("{}", output::listing_footer(rows.len(), snapshot.loaded_at()));
        }
        SessionAction::Delete { id } => {
            let refresh = sessions.delete(id, &ctx.cancel).await?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Search session #{id} deleted"));
        }
    }
    Ok(())
}
