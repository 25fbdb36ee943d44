#![allow(clippy::exit)]

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod surface;
mod timing;

use anyhow::Result;
use clap::Parser as _;

use crate::cli::{
    AnnouncementsCommand, Cli, Commands, ResultsCommand, StudentCommand, SubjectsCommand,
};
use crate::context::{AlreadyReported, AppContext};
use crate::output::Output;

async fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email } => commands::run_login(ctx, email).await,
        Commands::Logout => commands::run_logout(ctx),
        Commands::Whoami => commands::run_whoami(ctx),
        Commands::Signup { role } => commands::run_signup(ctx, role).await,
        Commands::List {
            entity,
            search,
            page,
        } => commands::run_list(ctx, entity.into(), search, page).await,
        Commands::Browse { entity } => commands::run_browse(ctx, entity.into()).await,
        Commands::Student(StudentCommand::Add(fields)) => {
            commands::run_student_add(ctx, fields).await
        }
        Commands::Student(StudentCommand::Update { id, fields }) => {
            commands::run_student_update(ctx, &id, fields).await
        }
        Commands::Delete { entity, id, yes } => {
            commands::run_delete(ctx, entity.into(), &id, yes).await
        }
        Commands::Subjects(SubjectsCommand::List) => commands::run_subjects_list(ctx).await,
        Commands::Subjects(SubjectsCommand::Add { name }) => {
            commands::run_subjects_add(ctx, &name).await
        }
        Commands::Announcements(AnnouncementsCommand::List) => {
            commands::run_announcements_list(ctx).await
        }
        Commands::Announcements(AnnouncementsCommand::Post { message }) => {
            commands::run_announcements_post(ctx, &message).await
        }
        Commands::Children => commands::run_children(ctx).await,
        Commands::Summarize { text } => commands::run_summarize(ctx, text).await,
        Commands::Results(ResultsCommand::Summary { term }) => {
            commands::run_results(ctx, &term).await
        }
        Commands::Results(ResultsCommand::Class { grade }) => {
            commands::run_class_results(ctx, &grade).await
        }
        Commands::Results(ResultsCommand::Feed { term }) => {
            commands::run_results_feed(ctx, term.as_deref()).await
        }
        Commands::Completions { shell } => {
            commands::generate_completions(shell);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    timing::init_tracing(cli.verbose, cli.timing);

    let result = match AppContext::from_env(cli.api_url) {
        Ok(ctx) => dispatch(&ctx, cli.command).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        if err.downcast_ref::<AlreadyReported>().is_none() {
            tracing::debug!("command failed: {err:?}");
            Output::new().error(format!("{err:#}"));
        }
        std::process::exit(1);
    }
}
