//! Account creation.

use anyhow::{Context as _, Result};
use brightpath_business::api::auth::{Credentials, GRADES, SignupRequest, signup};
use brightpath_business::api::subjects::{Subject, list_subjects};
use inquire::{MultiSelect, Password, PasswordDisplayMode, Select, Text};
use tracing::{instrument, warn};

use crate::cli::SignupRole;
use crate::context::AppContext;

fn prompt_credentials() -> Result<Credentials> {
    Ok(Credentials {
        name: Text::new("Full name:")
            .prompt()
            .context("Failed to read name")?,
        email: Text::new("Email:")
            .prompt()
            .context("Failed to read email")?,
        password: Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .context("Failed to read password")?,
    })
}

/// Subject picker entry; the id is what the backend wants.
struct SubjectChoice(Subject);

impl std::fmt::Display for SubjectChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.name)
    }
}

async fn prompt_teacher(ctx: &AppContext, credentials: Credentials) -> Result<SignupRequest> {
    let department = Text::new("Department:")
        .prompt()
        .context("Failed to read department")?;

    let subjects = match list_subjects(&ctx.client).await {
        Ok(subjects) => subjects,
        Err(err) => {
            warn!("could not load subjects: {err}");
            ctx.out.warning(format!("Could not load subjects: {err}"));
            Vec::new()
        }
    };
    let subjects = if subjects.is_empty() {
        Vec::new()
    } else {
        MultiSelect::new(
            "Subjects:",
            subjects.into_iter().map(SubjectChoice).collect(),
        )
        .prompt()
        .context("Failed to read subjects")?
        .into_iter()
        .map(|choice| choice.0.id.0)
        .collect()
    };

    let grades = MultiSelect::new("Grades:", GRADES.to_vec())
        .prompt()
        .context("Failed to read grades")?
        .into_iter()
        .map(str::to_owned)
        .collect();

    Ok(SignupRequest::Teacher {
        credentials,
        department,
        subjects,
        grades,
    })
}

fn prompt_parent(credentials: Credentials) -> Result<SignupRequest> {
    Ok(SignupRequest::Parent {
        credentials,
        phone: Text::new("Phone:")
            .prompt()
            .context("Failed to read phone")?,
        admission_no: Text::new("Child's admission number:")
            .prompt()
            .context("Failed to read admission number")?,
    })
}

#[instrument(skip_all, name = "signup")]
pub async fn run_signup(ctx: &AppContext, role: Option<SignupRole>) -> Result<()> {
    let role = match role {
        Some(role) => role,
        None => {
            let options = vec!["Teacher", "Parent", "Admin"];
            match Select::new("Account type:", options)
                .prompt()
                .context("Failed to read account type")?
            {
                "Parent" => SignupRole::Parent,
                "Admin" => SignupRole::Admin,
                _ => SignupRole::Teacher,
            }
        }
    };

    let credentials = prompt_credentials()?;
    let request = match role {
        SignupRole::Teacher => prompt_teacher(ctx, credentials).await?,
        SignupRole::Parent => prompt_parent(credentials)?,
        SignupRole::Admin => SignupRequest::Admin { credentials },
    };

    let response = signup(&ctx.client, &request).await?;
    ctx.out.success(response.message_or(&format!(
        "{} account created. You can now log in.",
        capitalized(request.role().as_str())
    )));
    Ok(())
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
