//! A small HTTP API which lists the rows of a Notion database as `{id, name}` dropdown items for
//! the RCA form, gated by an allow-list of browser origins.

pub mod api;
pub mod config;
pub mod dropdown;
pub mod notion;

use std::sync::Arc;

pub use config::Config;
use notion::NotionClient;

/// The state shared by every request handler. Built once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The process configuration.
    pub config: Arc<Config>,

    /// The client for the remote Notion API.
    pub notion: NotionClient,
}

impl AppState {
    /// Constructs the shared state from the process configuration.
    pub fn new(config: Config) -> Self {
        let notion = NotionClient::new(&config.notion_api_url, config.notion_secret.clone());

        Self {
            config: Arc::new(config),
            notion,
        }
    }
}
