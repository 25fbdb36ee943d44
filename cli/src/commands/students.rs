//! Add and update students.

use anyhow::{Context as _, Result};
use brightpath_business::Role;
use brightpath_business::api::auth::GRADES;
use brightpath_business::api::students::{StudentForm, add_student, update_student};
use inquire::{Select, Text};
use tracing::instrument;

use crate::cli::StudentFields;
use crate::context::AppContext;

pub const GENDERS: [&str; 2] = ["Male", "Female"];

/// Fill the form from flags, prompting for whatever is missing.
///
/// `current` seeds the prompts when editing an existing student.
pub fn prompt_student_form(fields: StudentFields, current: Option<&StudentForm>) -> Result<StudentForm> {
    let seed = |value: Option<&String>| value.map(String::as_str).unwrap_or_default().to_owned();

    let name = match fields.name {
        Some(name) => name,
        None => Text::new("Name:")
            .with_initial_value(&seed(current.map(|c| &c.name)))
            .prompt()
            .context("Failed to read name")?,
    };
    let gender = match fields.gender {
        Some(gender) => gender,
        None => select_with_current("Gender:", &GENDERS, current.map(|c| c.gender.as_str()))
            .context("Failed to read gender")?,
    };
    let date_of_birth = match fields.dob {
        Some(dob) => dob,
        None => Text::new("Date of birth:")
            .with_help_message("YYYY-MM-DD")
            .with_initial_value(&seed(current.map(|c| &c.date_of_birth)))
            .prompt()
            .context("Failed to read date of birth")?,
    };
    let grade = match fields.grade {
        Some(grade) => grade,
        None => select_with_current("Grade:", &GRADES, current.map(|c| c.grade.as_str()))
            .context("Failed to read grade")?,
    };

    Ok(StudentForm {
        name,
        gender,
        date_of_birth,
        grade,
    })
}

fn select_with_current(
    prompt: &str,
    options: &[&str],
    current: Option<&str>,
) -> inquire::error::InquireResult<String> {
    let cursor = current
        .and_then(|current| options.iter().position(|option| *option == current))
        .unwrap_or(0);
    Select::new(prompt, options.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .map(str::to_owned)
}

#[instrument(skip_all, name = "student_add")]
pub async fn run_student_add(ctx: &AppContext, fields: StudentFields) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;
    let form = prompt_student_form(fields, None)?;
    let response = add_student(&ctx.client, &form).await?;
    ctx.out
        .success(response.message_or("Student added successfully!"));
    Ok(())
}

#[instrument(skip_all, name = "student_update", fields(id = %id))]
pub async fn run_student_update(ctx: &AppContext, id: &str, fields: StudentFields) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;
    let form = prompt_student_form(fields, None)?;
    let response = update_student(&ctx.client, id, &form).await?;
    ctx.out
        .success(response.message_or("Student updated successfully!"));
    Ok(())
}
