//! Interactive browser over the three admin tables.
//!
//! Mirrors the admin dashboard: one table visible at a time, local search and
//! paging, and edit/delete actions that refresh every table afterwards.

use std::fmt;

use anyhow::{Context as _, Result};
use brightpath_business::api::records::delete_record;
use brightpath_business::api::students::{StudentForm, update_student};
use brightpath_business::{
    AdminTables, EntityKind, LoadOutcome, PageDirection, Pagination, RenderedPage, Role,
};
use inquire::{Confirm, Select, Text};
use tracing::instrument;

use crate::cli::StudentFields;
use crate::commands::students::prompt_student_form;
use crate::context::AppContext;
use crate::surface::TerminalSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Search,
    ClearSearch,
    Switch,
    Refresh,
    Edit,
    Delete,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Next => "Next page",
            Self::Previous => "Previous page",
            Self::Search => "Search",
            Self::ClearSearch => "Clear search",
            Self::Switch => "Switch table",
            Self::Refresh => "Refresh",
            Self::Edit => "Edit a student",
            Self::Delete => "Delete a row",
            Self::Quit => "Quit",
        })
    }
}

/// Actions that make sense for the page on screen.
fn available_actions(kind: EntityKind, pagination: &Pagination, searching: bool, has_rows: bool) -> Vec<Action> {
    let mut actions = Vec::with_capacity(9);
    if pagination.next_enabled {
        actions.push(Action::Next);
    }
    if pagination.previous_enabled {
        actions.push(Action::Previous);
    }
    actions.push(Action::Search);
    if searching {
        actions.push(Action::ClearSearch);
    }
    actions.push(Action::Switch);
    actions.push(Action::Refresh);
    if has_rows {
        if kind == EntityKind::Student {
            actions.push(Action::Edit);
        }
        actions.push(Action::Delete);
    }
    actions.push(Action::Quit);
    actions
}

/// A pickable row of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowChoice {
    id: String,
    cells: Vec<String>,
}

impl fmt::Display for RowChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.cells.join(" · "))
    }
}

/// Rows without an id cannot be edited or deleted.
fn row_choices(page: &RenderedPage) -> Vec<RowChoice> {
    page.body
        .rows()
        .iter()
        .filter_map(|row| {
            Some(RowChoice {
                id: row.id.clone()?,
                cells: row.cells.clone(),
            })
        })
        .collect()
}

/// Student form seeded from a rendered students row
/// (`reg_no, name, grade, gender, date_of_birth`).
fn student_form_from_row(row: &RowChoice) -> StudentForm {
    let cell = |index: usize| {
        row.cells
            .get(index)
            .filter(|value| value.as_str() != brightpath_business::PLACEHOLDER)
            .cloned()
            .unwrap_or_default()
    };
    StudentForm {
        name: cell(1),
        grade: cell(2),
        gender: cell(3),
        date_of_birth: cell(4),
    }
}

fn show(ctx: &AppContext, tables: &mut AdminTables, kind: EntityKind) -> RenderedPage {
    let view = tables.view_mut(kind);
    let title = view.config().title;
    view.attach_surface(Box::new(
        TerminalSurface::new(ctx.out.clone(), title).with_ids(),
    ));
    let page = view.render();
    drop(view.detach_surface());
    page
}

fn pick_row(page: &RenderedPage, prompt: &str) -> Result<Option<RowChoice>> {
    let choices = row_choices(page);
    if choices.is_empty() {
        return Ok(None);
    }
    Select::new(prompt, choices)
        .prompt_skippable()
        .context("Failed to select row")
}

#[instrument(skip_all, name = "browse", fields(entity = %start))]
pub async fn run_browse(ctx: &AppContext, start: EntityKind) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;

    let mut tables = ctx.admin_tables();
    for (kind, outcome) in tables.load_all().await {
        if let LoadOutcome::Loaded(count) = outcome {
            log::debug!("{kind}: {count} rows");
        }
    }

    let mut kind = start;
    let mut page = show(ctx, &mut tables, kind);

    loop {
        let searching = !tables.view(kind).query().is_empty();
        let actions = available_actions(kind, &page.pagination, searching, !row_choices(&page).is_empty());
        let Some(action) = Select::new("Action:", actions)
            .prompt_skippable()
            .context("Failed to read action")?
        else {
            break;
        };

        match action {
            Action::Next => {
                tables.view_mut(kind).change_page(PageDirection::Next);
            }
            Action::Previous => {
                tables.view_mut(kind).change_page(PageDirection::Previous);
            }
            Action::Search => {
                let query = Text::new("Search:")
                    .with_initial_value(tables.view(kind).query())
                    .prompt()
                    .context("Failed to read search")?;
                tables.view_mut(kind).search(&query);
            }
            Action::ClearSearch => {
                tables.view_mut(kind).search("");
            }
            Action::Switch => {
                let kinds = EntityKind::ALL.to_vec();
                let cursor = kinds.iter().position(|k| *k == kind).unwrap_or(0);
                kind = Select::new("Table:", kinds)
                    .with_starting_cursor(cursor)
                    .prompt()
                    .context("Failed to read table")?;
            }
            Action::Refresh => {
                tables.invalidate_all().await;
            }
            Action::Edit => {
                if let Some(row) = pick_row(&page, "Student to edit:")? {
                    let current = student_form_from_row(&row);
                    let form = prompt_student_form(StudentFields::default(), Some(&current))?;
                    match update_student(&ctx.client, &row.id, &form).await {
                        Ok(response) => {
                            ctx.out
                                .success(response.message_or("Student updated successfully!"));
                            tables.view_mut(EntityKind::Student).invalidate().await;
                        }
                        Err(err) => ctx.out.error(err),
                    }
                }
            }
            Action::Delete => {
                if let Some(row) = pick_row(&page, "Row to delete:")? {
                    let confirmed = Confirm::new(&format!("Delete {row}?"))
                        .with_default(false)
                        .prompt()
                        .context("Failed to read confirmation")?;
                    if confirmed {
                        match delete_record(&ctx.client, kind, &row.id).await {
                            Ok(response) => {
                                ctx.out.success(response.message_or("Deleted."));
                                tables.invalidate_all().await;
                            }
                            Err(err) => ctx.out.error(err),
                        }
                    }
                }
            }
            Action::Quit => break,
        }

        page = show(ctx, &mut tables, kind);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use brightpath_business::{Column, RenderedRow, TableBody};

    use super::*;

    fn pagination(current_page: usize, total_pages: usize) -> Pagination {
        Pagination {
            current_page,
            total_pages,
            previous_enabled: current_page != 1,
            next_enabled: current_page < total_pages,
        }
    }

    #[test]
    fn test_actions_follow_pagination() {
        let actions = available_actions(EntityKind::Parent, &pagination(1, 3), false, true);
        assert!(actions.contains(&Action::Next));
        assert!(!actions.contains(&Action::Previous));
        assert!(!actions.contains(&Action::Edit));
        assert!(actions.contains(&Action::Delete));

        let actions = available_actions(EntityKind::Student, &pagination(3, 3), true, true);
        assert!(!actions.contains(&Action::Next));
        assert!(actions.contains(&Action::Previous));
        assert!(actions.contains(&Action::ClearSearch));
        assert!(actions.contains(&Action::Edit));
        assert_eq!(actions.last(), Some(&Action::Quit));
    }

    #[test]
    fn test_empty_page_offers_no_row_actions() {
        let actions = available_actions(EntityKind::Student, &pagination(1, 1), true, false);
        assert!(!actions.contains(&Action::Delete));
        assert!(!actions.contains(&Action::Edit));
    }

    #[test]
    fn test_row_choices_skip_rows_without_id() {
        let page = RenderedPage {
            columns: vec![Column::new("name", "Name")],
            body: TableBody::Rows(vec![
                RenderedRow {
                    id: Some("1".to_owned()),
                    cells: vec!["Grace".to_owned()],
                },
                RenderedRow {
                    id: None,
                    cells: vec!["Orphan".to_owned()],
                },
            ]),
            pagination: pagination(1, 1),
            matching: 2,
        };
        let choices = row_choices(&page);
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].to_string(), "[1] Grace");
    }

    #[test]
    fn test_student_form_from_row_drops_placeholders() {
        let row = RowChoice {
            id: "4".to_owned(),
            cells: vec![
                "BP-004".to_owned(),
                "Amani".to_owned(),
                "Grade 3".to_owned(),
                "Female".to_owned(),
                brightpath_business::PLACEHOLDER.to_owned(),
            ],
        };
        let form = student_form_from_row(&row);
        assert_eq!(form.name, "Amani");
        assert_eq!(form.grade, "Grade 3");
        assert_eq!(form.gender, "Female");
        assert_eq!(form.date_of_birth, "");
    }
}
