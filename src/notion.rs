//! A minimal client for the Notion API, covering only database queries.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

/// The Notion API version this client speaks.
pub const NOTION_VERSION: &str = "2022-06-28";

/// A client for the Notion API. Cloning it is cheap and shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct NotionClient {
    /// The HTTP client requests are sent with.
    http: reqwest::Client,

    /// The API's base URL, without a trailing slash.
    base_url: String,

    /// The integration secret sent as a bearer token, if configured.
    secret: Option<String>,
}

impl NotionClient {
    /// Constructs a client for the Notion API at the specified base URL.
    pub fn new(base_url: &str, secret: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            secret,
        }
    }

    /// Returns whether the client has a secret to authenticate with.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Queries a database by its ID, returning the first page of rows in the order Notion sends
    /// them. Further result pages aren't fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Notion responds with an error status, or the
    /// response body isn't a valid query result.
    pub async fn query_database(&self, database_id: &str) -> Result<Vec<Page>, reqwest::Error> {
        let mut request = self
            .http
            .post(format!("{}/v1/databases/{database_id}/query", self.base_url))
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({}));

        if let Some(secret) = &self.secret {
            request = request.bearer_auth(secret);
        }

        let response: QueryResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.has_more {
            tracing::debug!(
                database_id,
                rows = response.results.len(),
                "database has more rows than the first result page",
            );
        }

        Ok(response.results)
    }
}

/// The response body of a database query.
#[derive(Deserialize, Debug)]
struct QueryResponse {
    /// The rows in this page of results.
    results: Vec<Page>,

    /// Whether there are more rows after this page of results.
    #[serde(default)]
    has_more: bool,
}

/// A row of a Notion database.
#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Page {
    /// The page's stable ID.
    pub id: String,

    /// The page's property values, keyed by property name.
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// The value of one of a page's properties. Only title properties are modeled.
#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    /// A title property, holding the page's rich text title.
    Title {
        /// The title's rich text segments.
        title: Vec<RichText>,
    },

    /// Any property type other than a title.
    #[serde(other)]
    Other,
}

/// A segment of rich text.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct RichText {
    /// The segment's text without annotations. Present for every segment type.
    #[serde(default)]
    pub plain_text: String,

    /// The segment's content if it's a `text` segment.
    #[serde(default)]
    pub text: Option<TextContent>,
}

impl RichText {
    /// Gets the segment's text content, falling back to its plain text for segments which aren't
    /// `text` segments (such as mentions and equations).
    pub fn content(&self) -> &str {
        self.text
            .as_ref()
            .map_or(self.plain_text.as_str(), |text| text.content.as_str())
    }
}

/// The content of a `text` rich text segment.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct TextContent {
    /// The segment's literal text.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_deserialization() -> anyhow::Result<()> {
        let page: Page = serde_json::from_value(json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "properties": {
                "Name": {
                    "id": "title",
                    "type": "title",
                    "title": [{
                        "type": "text",
                        "text": { "content": "Outage", "link": null },
                        "plain_text": "Outage",
                    }],
                },
                "Severity": { "id": "%3AnGa", "type": "number", "number": 2 },
            },
        }))?;

        assert_eq!(page.id, "59833787-2cf9-4fdf-8782-e53db20768a5");
        assert_eq!(page.properties.get("Severity"), Some(&PropertyValue::Other));

        let Some(PropertyValue::Title { title }) = page.properties.get("Name") else {
            panic!("`Name` should be a title property");
        };

        assert_eq!(title.first().map(RichText::content), Some("Outage"));

        Ok(())
    }

    #[test]
    fn mention_content_falls_back_to_plain_text() -> anyhow::Result<()> {
        let segment: RichText = serde_json::from_value(json!({
            "type": "mention",
            "mention": { "type": "date", "date": { "start": "2024-01-01" } },
            "plain_text": "2024-01-01",
        }))?;

        assert_eq!(segment.content(), "2024-01-01");

        Ok(())
    }
}
