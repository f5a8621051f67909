// Shortcut categories served by `/api/categories`.

use serde::{Deserialize, Serialize};

/// A named group of shortcut links. `items` order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// The backend omits this key for empty categories.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// A single shortcut link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub url: String,
    /// Icon reference: an asset name or an absolute URL.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }
}
