use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::{debug, info};
use url::Url;

use crate::api::render::{render_screen, Screen};
use crate::config::UsersDirectoryConfig;
use crate::domain::events::StoreEvent;
use crate::domain::form::UserFormController;
use crate::domain::pagination::PaginationView;
use crate::domain::ports::UsersRemote;
use crate::domain::store::UserStore;
use crate::infra::events::BroadcastPublisher;
use crate::infra::http::HttpUsersClient;
use modkit_http::TracedClient;

/// Wires the store to its HTTP adapter and event channel, and hands out the
/// per-view components (pagination, form).
#[derive(Debug)]
pub struct UsersDirectory {
    store: Arc<UserStore>,
    events: BroadcastPublisher,
    config: UsersDirectoryConfig,
}

impl UsersDirectory {
    /// Build against the configured REST service.
    pub fn init(cfg: UsersDirectoryConfig) -> anyhow::Result<Self> {
        info!("Initializing users_directory module");
        debug!(
            "Loaded users_directory config: base_url={}, users_per_page={}, timeout_sec={}",
            cfg.base_url, cfg.users_per_page, cfg.timeout_sec
        );

        let base = Url::parse(&cfg.base_url)
            .with_context(|| format!("Invalid users base_url '{}'", cfg.base_url))?;
        let timeout = (cfg.timeout_sec > 0).then(|| Duration::from_secs(cfg.timeout_sec));
        let client = TracedClient::with_timeout(timeout).context("Failed to build HTTP client")?;

        let remote = HttpUsersClient::new(client, base);
        Ok(Self::with_remote(Arc::new(remote), cfg))
    }

    /// Build against any remote implementation.
    pub fn with_remote(remote: Arc<dyn UsersRemote>, cfg: UsersDirectoryConfig) -> Self {
        let events = BroadcastPublisher::new(cfg.event_buffer);
        let store = Arc::new(UserStore::new(remote, Arc::new(events.clone())));
        Self {
            store,
            events,
            config: cfg,
        }
    }

    pub fn store(&self) -> Arc<UserStore> {
        self.store.clone()
    }

    pub fn config(&self) -> &UsersDirectoryConfig {
        &self.config
    }

    /// Receive a [`StoreEvent`] for every state change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn pagination(&self) -> PaginationView {
        PaginationView::new(self.config.users_per_page)
    }

    pub fn form(&self) -> UserFormController {
        UserFormController::new(self.store.clone())
    }

    /// Text for the current state of the store under `pagination` and `form`.
    pub fn render(&self, pagination: &PaginationView, form: &UserFormController) -> String {
        let users = self.store.users();
        let last_error = self.store.last_error();
        render_screen(&Screen {
            visible: pagination.visible_slice(&users),
            current_page: pagination.current_page(),
            total_pages: pagination.total_pages(users.len()),
            last_error: last_error.as_ref(),
            submit_label: form.submit_label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_rejects_bad_base_url() {
        let cfg = UsersDirectoryConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(UsersDirectory::init(cfg).is_err());
    }

    #[test]
    fn pagination_uses_configured_page_size() {
        let cfg = UsersDirectoryConfig {
            users_per_page: 8,
            ..Default::default()
        };
        let module = UsersDirectory::init(cfg).unwrap();
        let view = module.pagination();
        assert_eq!(view.users_per_page(), 8);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn empty_store_renders_header_only_table() {
        let module = UsersDirectory::init(UsersDirectoryConfig::default()).unwrap();
        let out = module.render(&module.pagination(), &module.form());
        assert!(out.contains("User Management"));
        assert!(!out.contains("Pages:"));
        assert!(out.contains("Form: Add User"));
    }
}
