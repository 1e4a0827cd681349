use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use nextjob_core::opportunity::OpportunityStatus;
use nextjob_core::view::{OpportunitySortField, OpportunityView, StatusFilter, ViewProjector};

use super::{Context, OrderArg, rename_failed};
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    New,
    Ignore,
}

impl From<StatusArg> for OpportunityStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::New => OpportunityStatus::New,
            StatusArg::Ignore => OpportunityStatus::Ignore,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Url,
    Score,
    LastUpdate,
}

impl From<SortArg> for OpportunitySortField {
    fn from(field: SortArg) -> Self {
        match field {
            SortArg::Url => OpportunitySortField::Url,
            SortArg::Score => OpportunitySortField::Score,
            SortArg::LastUpdate => OpportunitySortField::LastUpdate,
        }
    }
}

#[derive(Subcommand)]
pub enum OpportunityAction {
    /// List opportunities
    List {
        /// Only show these statuses (repeatable); defaults to the configured set
        #[arg(long = "status", value_enum)]
        statuses: Vec<StatusArg>,
        #[arg(long, value_enum, default_value_t = SortArg::Url)]
        sort: SortArg,
        #[arg(long, value_enum, default_value_t = OrderArg::Asc)]
        order: OrderArg,
    },
    /// Record an opportunity for the active role
    Add {
        url: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        score: i64,
        #[arg(long, value_enum, default_value_t = StatusArg::New)]
        status: StatusArg,
    },
    /// Change an opportunity's status
    Status {
        url: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Delete one opportunity
    Remove { url: String },
    /// Delete every opportunity
    RemoveAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Change the URL of an opportunity
    Rename { old_url: String, new_url: String },
}

pub async fn execute(action: OpportunityAction, ctx: &Context) -> Result<()> {
    let opportunities = &ctx.app.opportunities;
    let cancel = &ctx.cancel;

    match action {
        OpportunityAction::List {
            statuses,
            sort,
            order,
        } => {
            let view = OpportunityView {
                statuses: if statuses.is_empty() {
                    ctx.view.status_filter()
                } else {
                    StatusFilter::only(statuses.into_iter().map(Into::into))
                },
                sort_by: sort.into(),
                order: order.into(),
            };
            let active = ctx.app.job_roles.active_role(cancel).await?;
            let snapshot = opportunities.load(cancel).await?;
            println!("{}", output::active_role_banner(active.as_ref()));
            println!("Statuses: {}", output::status_filter_label(&view.statuses));
            let rows = ViewProjector::opportunities(snapshot.items(), &view);
            if rows.is_empty() {
                println!("No opportunities");
            }
            for opportunity in &rows {
                println!(
                    "{:<60} {:>5} {:<7} {}",
                    opportunity.url,
                    opportunity.score,
                    opportunity.status,
                    output::timestamp(opportunity.last_update)
                );
            }
            println!("{}", output::listing_footer(rows.len(), snapshot.loaded_at()));
        }
        OpportunityAction::Add { url, score, status } => {
            let refresh = opportunities
                .add(&url, score, status.into(), cancel)
                .await?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Added {}", url.trim()));
        }
        OpportunityAction::Status { url, status } => {
            let snapshot = opportunities.set_status(&url, status.into(), cancel).await?;
            let url = url.trim().to_string();
            match snapshot.get(&url) {
                Some(updated) => output::print_success(&format!(
                    "{} is now {} (updated {})",
                    updated.url,
                    updated.status,
                    output::timestamp(updated.last_update)
                )),
                None => output::print_success(&format!("{url} updated")),
            }
        }
        OpportunityAction::Remove { url } => {
            let refresh = opportunities.remove(&url, cancel).await?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Removed {url}"));
        }
        OpportunityAction::RemoveAll { yes } => {
            if !yes {
                bail!("Refusing to delete every opportunity without --yes");
            }
            let refresh = opportunities.remove_all(cancel).await?;
            output::print_refresh(&refresh);
            output::print_success("All opportunities deleted");
        }
        OpportunityAction::Rename { old_url, new_url } => {
            // Renaming carries the cached score and status over to the new URL.
            opportunities.load(cancel).await?;
            let refresh = opportunities
                .rename(&old_url, &new_url, cancel)
                .await
                .map_err(rename_failed)?;
            output::print_refresh(&refresh);
            output::print_success(&format!("Renamed {old_url} to {new_url}"));
        }
    }
    Ok(())
}
