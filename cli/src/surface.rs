//! Draws rendered table pages into the terminal.

use brightpath_business::{Column, Pagination, TableBody, TableSurface};
use console::style;
use tabled::builder::Builder;
use tabled::settings::{Span, Style};

use crate::output::Output;

/// [`TableSurface`] that prints each page as a rounded `tabled` table.
pub struct TerminalSurface {
    out: Output,
    title: &'static str,
    show_ids: bool,
}

impl TerminalSurface {
    pub fn new(out: Output, title: &'static str) -> Self {
        Self {
            out,
            title,
            show_ids: false,
        }
    }

    /// Prefix every row with its record id, for picking rows to edit or delete.
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }
}

impl TableSurface for TerminalSurface {
    fn draw_body(&mut self, columns: &[Column], body: &TableBody) {
        self.out.newline();
        self.out.header(self.title);
        self.out.print(render_body(columns, body, self.show_ids));
    }

    fn draw_pagination(&mut self, pagination: &Pagination) {
        self.out.print(render_pagination(pagination));
    }
}

pub fn render_body(columns: &[Column], body: &TableBody, show_ids: bool) -> String {
    let mut builder = Builder::default();

    let mut header: Vec<String> = Vec::with_capacity(columns.len() + 1);
    if show_ids {
        header.push("ID".to_owned());
    }
    header.extend(columns.iter().map(|column| column.label.to_owned()));
    let width = header.len();
    builder.push_record(header);

    // The placeholder spans its columns plus the id column when shown.
    let mut placeholder_span = None;
    match body {
        TableBody::Placeholder { colspan, label } => {
            let mut record = vec![String::new(); width];
            if let Some(first) = record.first_mut() {
                *first = (*label).to_owned();
            }
            builder.push_record(record);
            placeholder_span = Some(colspan + usize::from(show_ids));
        }
        TableBody::Rows(rows) => {
            for row in rows {
                let mut record = Vec::with_capacity(width);
                if show_ids {
                    record.push(row.id.clone().unwrap_or_default());
                }
                record.extend(row.cells.iter().cloned());
                builder.push_record(record);
            }
        }
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    if let Some(span) = placeholder_span.filter(|&span| span > 1) {
        table.modify((1, 0), Span::column(isize::try_from(span).unwrap_or(isize::MAX)));
    }
    table.to_string()
}

pub fn render_pagination(pagination: &Pagination) -> String {
    let control = |label: &str, enabled: bool| {
        if enabled {
            style(label).cyan().to_string()
        } else {
            style(label).dim().to_string()
        }
    };
    format!(
        "{}  {} of {}  {}",
        control("◀ prev", pagination.previous_enabled),
        style(pagination.indicator()).bold(),
        pagination.total_pages,
        control("next ▶", pagination.next_enabled),
    )
}
