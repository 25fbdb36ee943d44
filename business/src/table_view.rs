//! Searchable, paginated view over one remote collection.
//!
//! A [`TableView`] fetches its whole collection once per load, normalizes each
//! record into a [`Row`] and renders one page of the active source (the full
//! collection, or the result of the last search) into an optional
//! [`TableSurface`]. Filtering and paging are purely local; only
//! [`TableView::load`] / [`TableView::invalidate`] touch the network.
//!
//! ## Loads
//!
//! Every load takes a [`LoadTicket`] with a fresh generation. Completing a
//! ticket that is no longer the newest is a no-op ([`LoadOutcome::Stale`]), so
//! overlapping loads resolve to the most recently *started* one regardless of
//! the order responses arrive in. Starting a load also cancels the previous
//! ticket.

use std::num::NonZeroUsize;
use std::sync::Arc;

use log::{debug, error, info};
use serde_json::Value;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::envelope::EnvelopeShape;
use crate::paging::{clamp_page, page_range, total_pages};
use crate::report::{LogReporter, Reporter};
use crate::row::{Column, Row};
use crate::source::{CollectionSource, LoadError, LoadTicket};

/// Label of the single row shown when a page has nothing to display.
pub const NO_RECORDS_LABEL: &str = "No records found";

/// Maps one raw backend record to a [`Row`]. Must be total and deterministic.
pub type Normalizer = fn(&Value) -> Row;

/// Per-entity configuration of a [`TableView`].
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub title: &'static str,
    pub endpoint: &'static str,
    pub envelope: EnvelopeShape,
    pub columns: Vec<Column>,
    pub normalize: Normalizer,
    pub page_size: NonZeroUsize,
}

impl TableConfig {
    pub fn new(
        title: &'static str,
        endpoint: &'static str,
        envelope: EnvelopeShape,
        columns: Vec<Column>,
        normalize: Normalizer,
    ) -> Self {
        Self {
            title,
            endpoint,
            envelope,
            columns,
            normalize,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Lifecycle of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    /// Last load failed; the previous collection (possibly empty) is still shown.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

/// One rendered table row, cells in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: Option<String>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A single row spanning `colspan` columns.
    Placeholder { colspan: usize, label: &'static str },
    Rows(Vec<RenderedRow>),
}

impl TableBody {
    /// Number of visual rows, the placeholder counting as one.
    pub fn len(&self) -> usize {
        match self {
            Self::Placeholder { .. } => 1,
            Self::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    pub fn rows(&self) -> &[RenderedRow] {
        match self {
            Self::Placeholder { .. } => &[],
            Self::Rows(rows) => rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl Pagination {
    fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
            previous_enabled: current_page != 1,
            next_enabled: current_page < total_pages,
        }
    }

    pub fn indicator(&self) -> String {
        format!("Page {}", self.current_page)
    }
}

/// Everything one render pushes to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub columns: Vec<Column>,
    pub body: TableBody,
    pub pagination: Pagination,
    /// Rows in the active source (after filtering).
    pub matching: usize,
}

/// Where rendered pages end up.
///
/// Both methods default to doing nothing, which is how a surface without a
/// row container or without pagination controls is expressed.
pub trait TableSurface: Send {
    fn draw_body(&mut self, _columns: &[Column], _body: &TableBody) {}

    fn draw_pagination(&mut self, _pagination: &Pagination) {}
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// The collection was replaced with this many rows.
    Loaded(usize),
    /// The load failed; the previous collection is kept.
    Failed(LoadError),
    /// A newer load was started in the meantime; this result was dropped.
    Stale,
}

pub struct TableView {
    config: TableConfig,
    source: Arc<dyn CollectionSource>,
    reporter: Arc<dyn Reporter>,
    surface: Option<Box<dyn TableSurface>>,
    full_data: Vec<Row>,
    /// Indices into `full_data`: the last rendered source.
    active: Vec<usize>,
    query: String,
    current_page: usize,
    status: ViewStatus,
    generation: u64,
    in_flight: Option<LoadTicket>,
}

impl std::fmt::Debug for TableView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableView")
            .field("title", &self.config.title)
            .field("endpoint", &self.config.endpoint)
            .field("rows", &self.full_data.len())
            .field("active", &self.active.len())
            .field("query", &self.query)
            .field("current_page", &self.current_page)
            .field("status", &self.status)
            .field("generation", &self.generation)
            .field("has_surface", &self.surface.is_some())
            .finish()
    }
}

impl TableView {
    pub fn new(config: TableConfig, source: Arc<dyn CollectionSource>) -> Self {
        Self {
            config,
            source,
            reporter: Arc::new(LogReporter),
            surface: None,
            full_data: Vec::new(),
            active: Vec::new(),
            query: String::new(),
            current_page: 1,
            status: ViewStatus::Unloaded,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_surface(mut self, surface: Box<dyn TableSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn attach_surface(&mut self, surface: Box<dyn TableSurface>) {
        self.surface = Some(surface);
    }

    pub fn detach_surface(&mut self) -> Option<Box<dyn TableSurface>> {
        self.surface.take()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// The whole fetched collection, unfiltered.
    pub fn rows(&self) -> &[Row] {
        &self.full_data
    }

    /// Rows of the active source, in order.
    pub fn active_rows(&self) -> impl Iterator<Item = &Row> {
        self.active.iter().map(|&index| &self.full_data[index])
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.active.len(), self.config.page_size)
    }

    /// Start a load: bump the generation and cancel whatever was in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        if let Some(previous) = self.in_flight.take() {
            debug!(
                "{}: superseding load #{}",
                self.config.title,
                previous.generation()
            );
            previous.cancel();
        }

        self.generation += 1;
        let ticket = LoadTicket::new(self.generation);
        self.in_flight = Some(ticket.clone());
        self.status = ViewStatus::Loading;
        ticket
    }

    /// Apply the result of a load started with [`Self::begin_load`].
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Value, LoadError>,
    ) -> LoadOutcome {
        if ticket.generation() != self.generation {
            debug!(
                "{}: dropping stale load #{} (current #{})",
                self.config.title,
                ticket.generation(),
                self.generation
            );
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        let records = result.and_then(|body| {
            self.config
                .envelope
                .extract(body)
                .map_err(LoadError::from)
        });

        match records {
            Ok(records) => {
                let normalize = self.config.normalize;
                self.full_data = records.iter().map(normalize).collect();
                self.active = (0..self.full_data.len()).collect();
                self.query.clear();
                self.current_page = 1;
                self.status = ViewStatus::Loaded;
                info!(
                    "{}: loaded {} rows from {}",
                    self.config.title,
                    self.full_data.len(),
                    self.config.endpoint
                );
                self.render();
                LoadOutcome::Loaded(self.full_data.len())
            }
            Err(err) => {
                error!("{}: failed to load {}: {err}", self.config.title, self.config.endpoint);
                self.reporter
                    .error(&format!("Could not load {}: {err}", self.config.title.to_lowercase()));
                self.status = ViewStatus::Failed(err.to_string());
                self.render();
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Fetch the collection and replace the cached rows.
    pub async fn load(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let source = Arc::clone(&self.source);
        let result = ticket.fetch(source.as_ref(), self.config.endpoint).await;
        self.complete_load(&ticket, result)
    }

    /// Re-fetch after an external mutation. Same as [`Self::load`].
    pub async fn invalidate(&mut self) -> LoadOutcome {
        self.load().await
    }

    /// Re-filter the full collection and show page 1 of the result.
    pub fn search(&mut self, query: &str) -> RenderedPage {
        self.query = query.to_lowercase();
        self.active = if self.query.is_empty() {
            (0..self.full_data.len()).collect()
        } else {
            let columns = &self.config.columns;
            self.full_data
                .iter()
                .enumerate()
                .filter(|(_, row)| row.matches(columns, &self.query))
                .map(|(index, _)| index)
                .collect()
        };
        self.current_page = 1;
        self.render()
    }

    pub fn change_page(&mut self, direction: PageDirection) -> RenderedPage {
        match direction {
            PageDirection::Previous => {
                if self.current_page > 1 {
                    self.current_page -= 1;
                }
            }
            PageDirection::Next => self.current_page += 1,
        }
        self.render()
    }

    /// Render the current page of the active source.
    pub fn render(&mut self) -> RenderedPage {
        let total = self.total_pages();
        self.current_page = clamp_page(self.current_page, total);

        let range = page_range(self.current_page, self.config.page_size, self.active.len());
        let columns = &self.config.columns;

        let body = if range.is_empty() {
            TableBody::Placeholder {
                colspan: columns.len(),
                label: NO_RECORDS_LABEL,
            }
        } else {
            TableBody::Rows(
                self.active[range]
                    .iter()
                    .map(|&index| {
                        let row = &self.full_data[index];
                        RenderedRow {
                            id: row.id().map(str::to_owned),
                            cells: columns
                                .iter()
                                .map(|column| row.display(column.key).into_owned())
                                .collect(),
                        }
                    })
                    .collect(),
            )
        };

        let page = RenderedPage {
            columns: columns.clone(),
            body,
            pagination: Pagination::new(self.current_page, total),
            matching: self.active.len(),
        };

        if let Some(surface) = self.surface.as_mut() {
            surface.draw_body(&page.columns, &page.body);
            surface.draw_pagination(&page.pagination);
        }

        page
    }
}
