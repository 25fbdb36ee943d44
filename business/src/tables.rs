//! The admin dashboard's three tables, refreshed together.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::entities::EntityKind;
use crate::report::Reporter;
use crate::source::CollectionSource;
use crate::table_view::{LoadOutcome, TableView};

#[derive(Debug)]
pub struct AdminTables {
    students: TableView,
    teachers: TableView,
    parents: TableView,
}

impl AdminTables {
    pub fn new(
        source: Arc<dyn CollectionSource>,
        reporter: Arc<dyn Reporter>,
        page_size: NonZeroUsize,
    ) -> Self {
        let view = |kind: EntityKind| {
            TableView::new(kind.config().with_page_size(page_size), Arc::clone(&source))
                .with_reporter(Arc::clone(&reporter))
        };
        Self {
            students: view(EntityKind::Student),
            teachers: view(EntityKind::Teacher),
            parents: view(EntityKind::Parent),
        }
    }

    pub fn view(&self, kind: EntityKind) -> &TableView {
        match kind {
            EntityKind::Student => &self.students,
            EntityKind::Teacher => &self.teachers,
            EntityKind::Parent => &self.parents,
        }
    }

    pub fn view_mut(&mut self, kind: EntityKind) -> &mut TableView {
        match kind {
            EntityKind::Student => &mut self.students,
            EntityKind::Teacher => &mut self.teachers,
            EntityKind::Parent => &mut self.parents,
        }
    }

    /// Load all three views concurrently. Each view fails on its own.
    pub async fn load_all(&mut self) -> [(EntityKind, LoadOutcome); 3] {
        let (students, teachers, parents) = tokio::join!(
            self.students.load(),
            self.teachers.load(),
            self.parents.load()
        );
        [
            (EntityKind::Student, students),
            (EntityKind::Teacher, teachers),
            (EntityKind::Parent, parents),
        ]
    }

    /// Re-fetch everything, e.g. after a delete.
    pub async fn invalidate_all(&mut self) -> [(EntityKind, LoadOutcome); 3] {
        self.load_all().await
    }
}
