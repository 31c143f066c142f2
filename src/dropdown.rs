//! Conversion of Notion database rows into dropdown items.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notion::{Page, PropertyValue, RichText};

/// The name of the title property every row must have.
pub const NAME_PROPERTY: &str = "Name";

/// An entry of the RCA dropdown.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct DropdownItem {
    /// The ID of the Notion page the item represents.
    pub id: String,

    /// The page's name.
    pub name: String,
}

/// An error from a row not having the shape a dropdown item requires.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ShapeError {
    /// The page has no `Name` property.
    #[error("page {page_id} must have \"Name\" property")]
    MissingName {
        /// The offending page's ID.
        page_id: String,
    },

    /// The page's `Name` property isn't a title property.
    #[error("page {page_id} has a \"Name\" property which isn't a title")]
    NameNotTitle {
        /// The offending page's ID.
        page_id: String,
    },

    /// The page's `Name` title has no text segments.
    #[error("page {page_id} has an empty \"Name\" title")]
    EmptyName {
        /// The offending page's ID.
        page_id: String,
    },
}

/// Gets the text of the first segment of a page's `Name` title.
///
/// # Errors
///
/// Fails if the page has no `Name` property, or it isn't a title, or the title is empty.
pub fn page_name(page: &Page) -> Result<&str, ShapeError> {
    let page_id = || page.id.clone();

    match page.properties.get(NAME_PROPERTY) {
        None => Err(ShapeError::MissingName { page_id: page_id() }),
        Some(PropertyValue::Other) => Err(ShapeError::NameNotTitle { page_id: page_id() }),
        Some(PropertyValue::Title { title }) => title
            .first()
            .map(RichText::content)
            .ok_or_else(|| ShapeError::EmptyName { page_id: page_id() }),
    }
}

/// Converts one page into a dropdown item.
///
/// # Errors
///
/// See [`page_name`].
pub fn dropdown_item(page: &Page) -> Result<DropdownItem, ShapeError> {
    Ok(DropdownItem {
        id: page.id.clone(),
        name: page_name(page)?.to_owned(),
    })
}

/// Converts every page into a dropdown item, keeping their order. A single malformed page fails
/// the whole conversion.
///
/// # Errors
///
/// See [`page_name`].
pub fn dropdown_items(pages: &[Page]) -> Result<Vec<DropdownItem>, ShapeError> {
    pages.iter().map(dropdown_item).collect()
}
