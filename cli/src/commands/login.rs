//! Login, logout and whoami.

use anyhow::{Context as _, Result};
use brightpath_business::api::auth::login;
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::{info, instrument};

use crate::context::AppContext;

#[instrument(skip_all, name = "login")]
pub async fn run_login(ctx: &AppContext, email: Option<String>) -> Result<()> {
    let out = &ctx.out;

    out.header("Login to BrightPath");
    out.newline();

    let email = match email {
        Some(email) => email,
        None => Text::new("Email:")
            .prompt()
            .context("Failed to read email")?,
    };
    let password = Password::new("Password:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read password")?;

    let session = login(&ctx.client, &email, &password).await?;
    ctx.store
        .save(&session)
        .context("Failed to save session")?;

    info!(role = %session.role, "logged in");
    out.success(format!(
        "Logged in as {} ({})",
        session.display_name(),
        session.role
    ));
    Ok(())
}

pub fn run_logout(ctx: &AppContext) -> Result<()> {
    let Some(session) = ctx.session()? else {
        ctx.out.dim("Not currently logged in.");
        return Ok(());
    };
    ctx.store.clear().context("Failed to clear session")?;
    ctx.out
        .success(format!("Logged out {}", session.display_name()));
    Ok(())
}

pub fn run_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session()? {
        Some(session) => {
            ctx.out.print(session.display_name());
            ctx.out.labeled("Email", &session.email, 2);
            ctx.out.labeled("Role", session.role, 2);
            ctx.out.labeled("Id", &session.id, 2);
        }
        None => ctx.out.dim("Not logged in."),
    }
    Ok(())
}
