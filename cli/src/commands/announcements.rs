use anyhow::Result;
use brightpath_business::Role;
use brightpath_business::api::announcements::{list_announcements, post_announcement};
use console::style;
use tracing::instrument;

use crate::context::AppContext;

#[instrument(skip_all, name = "announcements_list")]
pub async fn run_announcements_list(ctx: &AppContext) -> Result<()> {
    ctx.require_session(&[Role::Admin, Role::Teacher, Role::Parent])?;

    let announcements = list_announcements(&ctx.client).await?;
    if announcements.is_empty() {
        ctx.out.dim("No announcements yet.");
        return Ok(());
    }

    for announcement in &announcements {
        let poster = announcement.posted_by.as_deref().unwrap_or("Admin");
        let when = announcement.created_at.as_deref().unwrap_or_default();
        ctx.out.print(format!(
            "{} {}",
            style("📢").bold(),
            announcement.message
        ));
        ctx.out.dim(format!("   {poster} {when}"));
    }
    ctx.out.count("Announcements", announcements.len());
    Ok(())
}

#[instrument(skip_all, name = "announcements_post")]
pub async fn run_announcements_post(ctx: &AppContext, message: &str) -> Result<()> {
    let session = ctx.require_session(&[Role::Admin])?;
    let response = post_announcement(&ctx.client, message, Some(&session)).await?;
    ctx.out
        .success(response.message_or("Announcement posted successfully!"));
    Ok(())
}
