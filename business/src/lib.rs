//! BrightPath client core: searchable, paginated table views over the
//! backend's collections, plus typed calls for everything else the
//! dashboards do.

pub mod api;
pub mod config;
pub mod entities;
pub mod envelope;
pub mod http;
pub mod paging;
pub mod report;
pub mod row;
pub mod session;
pub mod source;
pub mod table_view;
pub mod tables;

pub use api::{ApiError, ApiResult, MessageResponse};
pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};
pub use entities::EntityKind;
pub use envelope::{EnvelopeShape, ShapeError};
pub use report::{LogReporter, RecordingReporter, Report, Reporter};
pub use row::{Cell, Column, PLACEHOLDER, Row};
pub use session::{MemorySessionStore, Role, Session, SessionStore, SessionStoreError};
pub use source::{CollectionSource, HttpSource, LoadError, LoadTicket};
pub use table_view::{
    LoadOutcome, PageDirection, Pagination, RenderedPage, RenderedRow, TableBody, TableConfig,
    TableSurface, TableView, ViewStatus,
};
pub use tables::AdminTables;
