use anyhow::Result;
use clap::Subcommand;
use nextjob_core::view::ViewProjector;
use nextjob_core::watchlist::{LastVisitPolicy, PageType};

use super::{Context, OrderArg, rename_failed};
use crate::output;

#[derive(Subcommand)]
pub enum WatchlistAction {
    /// List watched career pages by URL
    List {
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
    /// Watch a career page for the active role
    Add {
        url: String,
        /// How the page is parsed, e.g. "ashbyhq"
        #[arg(long)]
        page_type: Option<String>,
    },
    /// Stop watching a career page
    Remove { url: String },
    /// Change the URL of a watched page
    Rename {
        old_url: String,
        new_url: String,
        /// Forget when the page was last visited
        #[arg(long)]
        reset_last_visit: bool,
    },
}

pub async fn execute(action: WatchlistAction, ctx: &Context) -> Result<()> {
    let watchlist = &ctx.app.watchlist;
    let cancel = &ctx.cancel;

    match action {
        WatchlistAction::List { order } => {
            let active = ctx.app.job_roles.active_role(cancel).await?;
            let snapshot = watchlist.load(cancel).await?;
            println!("{}", output::active_role_banner(active.as_ref()));
            if snapshot.is_empty() {
                println!("The watchlist is empty");
            }
            let order = order.map(Into::into).unwrap_or(ctx.view.watchlist_order);
            let rows = ViewProjector::watchlist(snapshot.items(), order);
            for entry in &rows {
                println!(
                    "{:<60} {:<10} {:>4}  {}",
                    entry.url,
                    entry.page_type.as_ref().map(PageType::as_str).unwrap_or("-"),
                    entry.job_role_id,
                    output::last_visit(entry.last_visit)
                );
            }
            println!("{}", output::listing_footer(rows.len(), snapshot.loaded_at()));
        }
        WatchlistAction::Add { url, page_type } => {
            let refresh = watchlist
                .add(&url, page_type.map(PageType::from), cancel)
                .await?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Watching {}", url.trim()));
        }
        WatchlistAction::Remove { url } => {
            let refresh = watchlist.remove(&url, cancel).await?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Removed {url}"));
        }
        WatchlistAction::Rename {
            old_url,
            new_url,
            reset_last_visit,
        } => {
            let policy = if reset_last_visit {
                LastVisitPolicy::Reset
            } else {
                LastVisitPolicy::Preserve
            };
            // Renaming carries the cached fields over to the new URL.
            watchlist.load(cancel).await?;
            let refresh = watchlist
                .rename(&old_url, &new_url, policy, cancel)
                .await
                .map_err(rename_failed)?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Renamed {old_url} to {new_url}"));
        }
    }
    Ok(())
}
