//! Print one page of an admin table.

use anyhow::Result;
use brightpath_business::{
    EntityKind, LoadOutcome, PageDirection, RenderedPage, Role, TableView,
};
use tracing::instrument;

use crate::context::{AlreadyReported, AppContext};
use crate::surface::TerminalSurface;

/// Load `view`, apply `search`, step to `page`. Nothing is drawn on the way.
///
/// A failed load has already gone through the view's reporter.
pub async fn prepare_page(
    view: &mut TableView,
    search: Option<&str>,
    page: usize,
) -> Result<RenderedPage> {
    if let LoadOutcome::Failed(err) = view.load().await {
        log::debug!("load failed: {err}");
        return Err(AlreadyReported.into());
    }
    if let Some(query) = search {
        view.search(query);
    }
    for _ in 1..page.min(view.total_pages()) {
        view.change_page(PageDirection::Next);
    }
    Ok(view.render())
}

#[instrument(skip_all, name = "list", fields(entity = %kind, page))]
pub async fn run_list(
    ctx: &AppContext,
    kind: EntityKind,
    search: Option<String>,
    page: usize,
) -> Result<()> {
    ctx.require_session(&[Role::Admin])?;

    let mut view = ctx.table_view(kind);
    let rendered = prepare_page(&mut view, search.as_deref(), page).await?;

    let title = view.config().title;
    view.attach_surface(Box::new(
        TerminalSurface::new(ctx.out.clone(), title).with_ids(),
    ));
    view.render();
    ctx.out.count("Matching", rendered.matching);
    Ok(())
}
