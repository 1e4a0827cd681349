use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use nextjob_application::{Refresh, Snapshot};
use nextjob_core::job_role::{CvDocument, JobRole, NewJobRole};
use nextjob_core::view::{SortOrder, ViewProjector};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum RoleAction {
    /// List job roles by name
    List,
    /// Show one job role
    Show { id: i64 },
    /// Create a job role from a PDF curriculum vitae
    Add {
        name: String,
        /// Path to the curriculum vitae (PDF)
        cv: PathBuf,
    },
    /// Change a role's name
    Rename { id: i64, name: String },
    /// Make a role the active one
    Activate { id: i64 },
    /// Delete an inactive role
    Delete { id: i64 },
    /// Download a role's curriculum vitae
    Cv {
        id: i64,
        /// Destination file (defaults to the uploaded filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the active role
    Active,
}

pub async fn execute(action: RoleAction, ctx: &Context) -> Result<()> {
    let roles = &ctx.app.job_roles;
    let cancel = &ctx.cancel;

    match action {
        RoleAction::List => {
            let snapshot = load(ctx).await?;
            print_roles(&snapshot);
        }
        RoleAction::Show { id } => {
            let role = roles.get(id, cancel).await?;
            println!("ID:     {}", role.id);
            println!("Name:   {}", role.name);
            println!("CV:     {}", output::or_na(role.cv_filename.as_deref()));
            println!("Active: {}", if role.is_active { "yes" } else { "no" });
        }
        RoleAction::Add { name, cv } => {
            let document = read_cv(&cv).await?;
            mutation(roles.create(&NewJobRole::new(name, document), cancel).await)?;
            output::print_success("Job role created");
            print_roles(&*roles.store().snapshot().await);
        }
        RoleAction::Rename { id, name } => {
            mutation(roles.rename_role(id, &name, cancel).await)?;
            output::print_success(&format!("Job role #{id} renamed"));
        }
        RoleAction::Activate { id } => {
            mutation(roles.activate(id, cancel).await)?;
            output::print_success(&format!("Job role #{id} is now active"));
        }
        RoleAction::Delete { id } => {
            // The local guard needs the current active flag.
            load(ctx).await?;
            mutation(roles.delete(id, cancel).await)?;
            output::print_success(&format!("Job role #{id} deleted"));
        }
        RoleAction::Cv { id, output: path } => {
            let path = match path {
                Some(path) => path,
                None => {
                    let role = roles.get(id, cancel).await?;
                    PathBuf::from(role.cv_filename.unwrap_or_else(|| format!("role-{id}.pdf")))
                }
            };
            let bytes = roles.download_cv(id, cancel).await?;
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::print_success(&format!("Saved {} bytes to {}", bytes.len(), path.display()));
        }
        RoleAction::Active => {
            let active = roles.active_role(cancel).await?;
            println!("{}", output::active_role_banner(active.as_ref()));
        }
    }
    Ok(())
}

/// Loads the roles. More than one active role is reported but still listed.
async fn load(ctx: &Context) -> Result<Arc<Snapshot<JobRole>>> {
    match ctx.app.job_roles.load(&ctx.cancel).await {
        Ok(snapshot) => Ok(snapshot),
        Err(err) if err.is_anomaly() => {
            output::print_warning(&err.user_message());
            Ok(ctx.app.job_roles.store().snapshot().await)
        }
        Err(err) => Err(err.into()),
    }
}

fn mutation(result: nextjob_core::Result<Refresh<JobRole>>) -> Result<()> {
    match result {
        Ok(refresh) => {
            output::print_refresh(&refresh);
            Ok(())
        }
        Err(err) if err.is_anomaly() => {
            // The change went through; the reloaded list is what looks wrong.
            output::print_warning(&err.user_message());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn read_cv(path: &Path) -> Result<CvDocument> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cv.pdf".to_string());
    let content_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());
    Ok(CvDocument::new(filename, content_type, bytes))
}

fn print_roles(snapshot: &Snapshot<JobRole>) {
    if snapshot.is_empty() {
        println!("No job roles");
        return;
    }
    for role in ViewProjector::job_roles(snapshot.items(), SortOrder::Ascending) {
        let marker = if role.is_active { "*" } else { " " };
        println!(
            "{marker} {:>4}  {:<32} {}",
            role.id,
            role.name,
            output::or_na(role.cv_filename.as_deref())
        );
    }
}
