use anyhow::{Context as _, Result};
use brightpath_business::api::records::delete_record;
use brightpath_business::{EntityKind, Role};
use inquire::Confirm;
use tracing::instrument;

use crate::context::AppContext;

#[instrument(skip_all, name = "delete", fields(entity = %kind, id = %id))]
pub async fn run_delete(ctx: &AppContext, kind: EntityKind, id: &str, yes: bool) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;

    if !yes {
        let confirmed = Confirm::new(&format!("Delete {} {id}?", kind.as_str()))
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;
        if !confirmed {
            ctx.out.dim("Cancelled.");
            return Ok(());
        }
    }

    let response = delete_record(&ctx.client, kind, id).await?;
    ctx.out
        .success(response.message_or(&format!("Deleted {} {id}.", kind.as_str())));
    Ok(())
}
