//! Admin results screens: upload progress, per-grade drill-down, and the
//! feed of uploaded marks.

use anyhow::Result;
use brightpath_business::api::results::{
    GradeSummary, ResultEntry, SubjectResults, class_results, results_summary, view_results,
};
use brightpath_business::{PLACEHOLDER, Role};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::commands::children::format_marks;
use crate::context::AppContext;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Subjects")]
    total_subjects: u32,
    #[tabled(rename = "Uploaded")]
    uploaded: u32,
    #[tabled(rename = "Pending")]
    pending: u32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<GradeSummary> for SummaryRow {
    fn from(summary: GradeSummary) -> Self {
        Self {
            class: summary.grade,
            total_subjects: summary.total_subjects,
            uploaded: summary.uploaded,
            pending: summary.pending,
            status: summary.status,
        }
    }
}

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Uploaded")]
    uploaded: u32,
    #[tabled(rename = "Pending")]
    pending: u32,
    #[tabled(rename = "Average")]
    average: String,
}

impl From<SubjectResults> for SubjectRow {
    fn from(results: SubjectResults) -> Self {
        Self {
            subject: results.subject,
            teacher: results.teacher.unwrap_or_else(|| PLACEHOLDER.to_owned()),
            uploaded: results.uploaded,
            pending: results.pending,
            average: results
                .average_marks
                .map_or_else(|| PLACEHOLDER.to_owned(), format_marks),
        }
    }
}

#[derive(Tabled)]
struct FeedRow {
    #[tabled(rename = "Reg No")]
    reg_no: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Marks")]
    marks: String,
    #[tabled(rename = "Term")]
    term: String,
    #[tabled(rename = "Exam")]
    exam: String,
}

impl From<ResultEntry> for FeedRow {
    fn from(entry: ResultEntry) -> Self {
        Self {
            reg_no: entry.student_reg.0,
            student: entry.student_name,
            grade: entry.grade,
            subject: entry.subject,
            teacher: entry.teacher,
            marks: format_marks(entry.marks),
            term: entry.term,
            exam: entry.exam_type,
        }
    }
}

#[instrument(skip_all, name = "results", fields(term = %term))]
pub async fn run_results(ctx: &AppContext, term: &str) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;

    let summary = results_summary(&ctx.client, term).await?;
    let complete = summary.iter().filter(|grade| grade.is_complete()).count();
    let total = summary.len();

    let mut table = Table::new(summary.into_iter().map(SummaryRow::from));
    table.with(Style::rounded());

    ctx.out.header(format!("Results upload for {}", term.trim()));
    ctx.out.print(table);
    ctx.out.count("Complete grades", complete);
    ctx.out.count("Grades", total);
    Ok(())
}

#[instrument(skip_all, name = "class_results", fields(grade = %grade))]
pub async fn run_class_results(ctx: &AppContext, grade: &str) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;

    let subjects = class_results(&ctx.client, grade).await?;
    ctx.out.header(format!("Results for {}", grade.trim()));
    if subjects.is_empty() {
        ctx.out.dim("No results yet.");
        return Ok(());
    }

    let mut table = Table::new(subjects.into_iter().map(SubjectRow::from));
    table.with(Style::rounded());
    ctx.out.print(table);
    Ok(())
}

#[instrument(skip_all, name = "results_feed")]
pub async fn run_results_feed(ctx: &AppContext, term: Option<&str>) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;

    let feed = view_results(&ctx.client, term).await?;
    ctx.out.header("Uploaded results");
    if feed.is_empty() {
        ctx.out.dim("No results yet.");
        return Ok(());
    }

    let total = feed.len();
    let mut table = Table::new(feed.into_iter().map(FeedRow::from));
    table.with(Style::rounded());
    ctx.out.print(table);
    ctx.out.count("Results", total);
    Ok(())
}
