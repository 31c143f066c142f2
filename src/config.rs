//! Process configuration, read once from the environment at startup.

use derive_more::derive::{AsRef, Deref};

/// The default base URL of the Notion API.
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";

/// The environment variable holding the Notion integration secret.
pub const NOTION_SECRET_VAR: &str = "NOTION_SECRET";

/// The environment variable holding the ID of the database to list.
pub const NOTION_MAIN_DB_ID_VAR: &str = "NOTION_MAIN_DB_ID";

/// The environment variable holding the comma-separated origin allow-list.
pub const ALLOWED_ORIGINS_VAR: &str = "ALLOWED_ORIGINS";

/// Immutable configuration shared by all request handlers.
///
/// Missing optional values aren't startup errors. They're reported per request so the server can
/// still answer with a meaningful status code.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// The address the server listens on.
    pub address: String,

    /// The bearer secret for the Notion API.
    pub notion_secret: Option<String>,

    /// The ID of the Notion database whose pages become dropdown items.
    pub main_db_id: Option<String>,

    /// The origins allowed to call the API.
    pub allowed_origins: Option<AllowedOrigins>,

    /// The base URL of the Notion API.
    pub notion_api_url: String,
}

impl Config {
    /// Reads the configuration from the environment, including any `.env` file.
    ///
    /// # Errors
    ///
    /// Fails if `ADDRESS` isn't set or any variable isn't valid Unicode.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            address: dotenvy::var("ADDRESS")?,
            notion_secret: optional_var(NOTION_SECRET_VAR)?,
            main_db_id: optional_var(NOTION_MAIN_DB_ID_VAR)?,
            allowed_origins: optional_var(ALLOWED_ORIGINS_VAR)?
                .map(|list| AllowedOrigins::parse(&list)),
            notion_api_url: optional_var("NOTION_API_URL")?
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_owned()),
        })
    }
}

/// Reads an environment variable, treating an unset variable as [`None`].
fn optional_var(key: &str) -> Result<Option<String>, dotenvy::Error> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(error),
    }
}

/// An ordered, duplicate-free list of origins permitted to call the API.
///
/// Matching is exact: `https://example.com` doesn't allow `https://example.com:443` or
/// `http://example.com`.
#[derive(Deref, AsRef, Clone, Default, PartialEq, Eq, Debug)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    /// Parses a comma-separated list of origins. Whitespace around each entry is trimmed, and
    /// empty or repeated entries are skipped.
    pub fn parse(list: &str) -> Self {
        let mut origins: Vec<String> = Vec::new();

        for origin in list.split(',').map(str::trim) {
            if !origin.is_empty() && !origins.iter().any(|existing| existing == origin) {
                origins.push(origin.to_owned());
            }
        }

        Self(origins)
    }

    /// Returns whether the specified origin is exactly one of the allowed origins.
    pub fn allows(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }
}
