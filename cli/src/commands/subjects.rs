use anyhow::Result;
use brightpath_business::Role;
use brightpath_business::api::subjects::{add_subject, list_subjects};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::context::AppContext;

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[instrument(skip_all, name = "subjects_list")]
pub async fn run_subjects_list(ctx: &AppContext) -> Result<()> {
    let subjects = list_subjects(&ctx.client).await?;
    if subjects.is_empty() {
        ctx.out.dim("No subjects yet.");
        return Ok(());
    }

    let rows: Vec<SubjectRow> = subjects
        .into_iter()
        .map(|subject| SubjectRow {
            id: subject.id.0,
            name: subject.name,
            description: subject.description.unwrap_or_default(),
        })
        .collect();
    let count = rows.len();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    ctx.out.print(table);
    ctx.out.count("Subjects", count);
    Ok(())
}

#[instrument(skip_all, name = "subjects_add")]
pub async fn run_subjects_add(ctx: &AppContext, name: &str) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;
    let response = add_subject(&ctx.client, name).await?;
    ctx.out
        .success(response.message_or(&format!("Subject '{}' added.", name.trim())));
    Ok(())
}
