use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nextjob_application::NextJob;
use nextjob_core::NextJobError;
use nextjob_infrastructure::ConfigService;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{Context, opportunities, roles, sessions, watchlist};

#[derive(Parser)]
#[command(name = "nextjob")]
#[command(about = "My Next Job - track job roles, career pages and opportunities", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to <config dir>/nextjob/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding the configuration file and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log every request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage job roles and their curriculum vitae
    Roles {
        #[command(subcommand)]
        action: roles::RoleAction,
    },
    /// Manage the watchlist of career pages
    Watchlist {
        #[command(subcommand)]
        action: watchlist::WatchlistAction,
    },
    /// Manage discovered opportunities
    #[command(alias = "opps")]
    Opportunities {
        #[command(subcommand)]
        action: opportunities::OpportunityAction,
    },
    /// Inspect past search sessions
    Sessions {
        #[command(subcommand)]
        action: sessions::SessionAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<NextJobError>() {
            Some(err) => eprintln!("Error: {}", err.user_message()),
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "nextjob=debug" } else { "nextjob=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut service = ConfigService::new();
    if let Some(path) = cli.config {
        service = service.with_path(path);
    }
    let mut config = service.get_config()?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight requests");
            interrupt.cancel();
        }
    });

    let ctx = Context {
        app: NextJob::connect(&config.api)?,
        view: config.view,
        cancel,
    };

    match cli.command {
        Commands::Roles { action } => roles::execute(action, &ctx).await,
        Commands::Watchlist { action } => watchlist::execute(action, &ctx).await,
        Commands::Opportunities { action } => opportunities::execute(action, &ctx).await,
        Commands::Sessions { action } => sessions::execute(action, &ctx).await,
    }
}
