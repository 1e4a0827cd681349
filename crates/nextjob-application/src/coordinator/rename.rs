//! Rename for natural-key resources.
//!
//! The remote API cannot change a record's URL in place, so a rename is two
//! independent requests: delete the old record, then create the new one. This
//! is not atomic. When the create fails, exactly one compensating create puts
//! the old record back; if that fails too, neither record exists and the caller
//! gets [`Anomaly::RenameCompensationFailed`].
//!
//! Cancellation is honoured before the delete step and on the create step.
//! The delete and the compensating create run on their own tokens: once a
//! rename has started, its outcome is always known and an abandoned caller
//! cannot leave the record half-renamed.

use nextjob_core::error::Anomaly;
use nextjob_core::resource::{NaturalKeyApi, NaturalKeyResource};
use nextjob_core::{NextJobError, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// The two field sets a rename works with.
#[derive(Debug, Clone)]
pub struct RenamePlan<R: NaturalKeyResource> {
    pub old_key: String,
    pub new_key: String,
    /// Attributes the record gets under its new key
    pub fields: R::Fields,
    /// Attributes used to recreate the old record if the create step fails
    pub restore: R::Fields,
}

/// Runs delete, create and, on create failure, one compensating create.
///
/// A failed delete step is returned as is. The old record may or may not
/// still exist (a timeout can land after the server applied it), so callers
/// reload on any error other than [`NextJobError::Cancelled`].
pub async fn execute_rename<R, A>(
    api: &A,
    plan: RenamePlan<R>,
    cancel: &CancellationToken,
) -> Result<()>
where
    R: NaturalKeyResource,
    A: NaturalKeyApi<R> + ?Sized,
{
    let RenamePlan {
        old_key,
        new_key,
        fields,
        restore,
    } = plan;

    if cancel.is_cancelled() {
        return Err(NextJobError::Cancelled);
    }

    api.delete(&old_key, &CancellationToken::new()).await?;

    let cause = match api.create(&R::draft(&new_key, fields), cancel).await {
        Ok(()) => {
            info!(kind = R::KIND, %old_key, %new_key, "Renamed");
            return Ok(());
        }
        Err(cause) => cause,
    };

    warn!(
        kind = R::KIND,
        %old_key,
        %new_key,
        error = %cause,
        "Create step of rename failed, restoring old record"
    );

    let compensation_token = CancellationToken::new();
    match api
        .create(&R::draft(&old_key, restore), &compensation_token)
        .await
    {
        Ok(()) => Err(NextJobError::RenameRolledBack {
            old_key,
            new_key,
            cause: Box::new(cause),
        }),
        Err(compensation) => {
            error!(
                kind = R::KIND,
                %old_key,
                %new_key,
                error = %compensation,
                "Restoring old record failed, neither key exists"
            );
            Err(Anomaly::RenameCompensationFailed {
                old_key,
                new_key,
                cause: Box::new(cause),
                compensation: Box::new(compensation),
            }
            .into())
        }
    }
}
