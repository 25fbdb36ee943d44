//! Everything a command needs: config, HTTP client, session store, output.

use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use brightpath_business::http::Client;
use brightpath_business::{
    AdminTables, BusinessConfig, EntityKind, HttpSource, Role, Session, SessionStore, TableView,
};

use crate::config::FileSessionStore;
use crate::output::Output;

/// Error that has already been shown to the user; only the exit code is left.
#[derive(Debug)]
pub struct AlreadyReported;

impl std::fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("already reported")
    }
}

impl std::error::Error for AlreadyReported {}

pub struct AppContext {
    pub config: BusinessConfig,
    pub client: Client,
    pub store: Box<dyn SessionStore>,
    pub out: Output,
}

impl AppContext {
    pub fn new(config: BusinessConfig, store: Box<dyn SessionStore>) -> Self {
        Self {
            client: config.client(),
            config,
            store,
            out: Output::new(),
        }
    }

    /// Environment config, `--api-url` override, session file in the config dir.
    pub fn from_env(api_url: Option<String>) -> Result<Self> {
        let mut config = BusinessConfig::from_env().context("Invalid configuration")?;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        let store = FileSessionStore::default_location()?;
        log::debug!("session file: {}", store.path().display());
        Ok(Self::new(config, Box::new(store)))
    }

    pub fn session(&self) -> Result<Option<Session>> {
        self.store.load().context("Failed to read saved session")
    }

    /// The saved session, if its role is one of `roles`.
    pub fn require_session(&self, roles: &[Role]) -> Result<Session> {
        let Some(session) = self.session()? else {
            bail!("Not logged in. Run `brightpath login` first.");
        };
        check_role(&session, roles)?;
        Ok(session)
    }

    pub fn table_view(&self, kind: EntityKind) -> TableView {
        TableView::new(
            kind.config().with_page_size(self.config.page_size),
            HttpSource::shared(self.client.clone()),
        )
        .with_reporter(Arc::new(self.out.clone()))
    }

    pub fn admin_tables(&self) -> AdminTables {
        AdminTables::new(
            HttpSource::shared(self.client.clone()),
            Arc::new(self.out.clone()),
            self.config.page_size,
        )
    }
}

fn check_role(session: &Session, roles: &[Role]) -> Result<()> {
    if roles.contains(&session.role) {
        return Ok(());
    }
    let allowed: Vec<&str> = roles.iter().map(|role| role.as_str()).collect();
    bail!(
        "This command is for {} accounts; you are logged in as {}.",
        allowed.join("/"),
        session.role
    )
}

#[cfg(test)]
mod tests {
    use brightpath_business::MemorySessionStore;

    use super::*;

    fn context(session: Option<Session>) -> AppContext {
        let store = MemorySessionStore::new();
        if let Some(session) = session {
            store.save(&session).unwrap();
        }
        AppContext::new(BusinessConfig::new("http://127.0.0.1:1"), Box::new(store))
    }

    fn teacher() -> Session {
        Session {
            id: "2".to_owned(),
            role: Role::Teacher,
            email: "kamau@school.org".to_owned(),
            name: None,
        }
    }

    #[test]
    fn test_require_session_without_login() {
        let err = context(None).require_session(&[Role::Admin]).unwrap_err();
        assert!(err.to_string().contains("brightpath login"));
    }

    #[test]
    fn test_require_session_checks_role() {
        let ctx = context(Some(teacher()));
        let err = ctx
            .require_session(&[Role::Admin, Role::Parent])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "This command is for admin/parent accounts; you are logged in as teacher."
        );
        assert_eq!(ctx.require_session(&[Role::Teacher]).unwrap(), teacher());
    }

    #[test]
    fn test_views_use_configured_page_size() {
        let mut ctx = context(None);
        ctx.config = ctx
            .config
            .clone()
            .with_page_size(std::num::NonZeroUsize::new(3).unwrap());
        let view = ctx.table_view(EntityKind::Parent);
        assert_eq!(view.config().page_size.get(), 3);
        assert_eq!(view.config().endpoint, "/get-parents");
    }
}
