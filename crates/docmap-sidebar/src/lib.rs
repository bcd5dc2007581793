//! Sidebar tree model for docmap.
//!
//! A sidebar manifest maps sidebar names to ordered trees of items. An
//! item is either a doc id (a leaf linking to a page) or a labeled
//! category grouping nested items. The manifest is generated JSON of the
//! shape:
//!
//! ```json
//! {
//!   "docs": [
//!     {"type": "category", "label": "Introduction",
//!      "items": ["synopsis", "hardware"]},
//!     "changelog"
//!   ]
//! }
//! ```
//!
//! Like the route table, sidebars are built once at startup, validated
//! eagerly, and never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single sidebar entry: a doc id leaf or a labeled category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Leaf linking to a doc by id.
    Doc(String),
    /// Labeled group of nested items.
    Category {
        /// Display label.
        label: String,
        /// Nested items in display order.
        items: Vec<SidebarItem>,
    },
}

/// Error raised while building [`Sidebars`].
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// Category with an empty label.
    #[error("category in sidebar {sidebar} has an empty label")]
    EmptyLabel {
        /// Name of the sidebar containing the category.
        sidebar: String,
    },
    /// Category with no items.
    #[error("category {label} in sidebar {sidebar} has no items")]
    EmptyCategory {
        /// Name of the sidebar containing the category.
        sidebar: String,
        /// Label of the empty category.
        label: String,
    },
    /// Manifest JSON could not be parsed.
    #[error("sidebar parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Manifest file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Named, validated sidebar trees.
///
/// Immutable after construction. Item order within a sidebar is the
/// reading order of the docs; sidebar names are kept sorted.
#[derive(Debug)]
pub struct Sidebars {
    sidebars: BTreeMap<String, Vec<SidebarItem>>,
}

impl Sidebars {
    /// Build validated sidebars from named item trees.
    ///
    /// Categories must carry a non-empty label and at least one item.
    /// A doc id appearing more than once within the same sidebar is
    /// allowed but logged as a warning for build diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] for malformed categories.
    pub fn new(sidebars: BTreeMap<String, Vec<SidebarItem>>) -> Result<Self, SidebarError> {
        for (name, items) in &sidebars {
            validate_items(name, items)?;
            warn_duplicate_docs(name, items);
        }
        Ok(Self { sidebars })
    }

    /// Build sidebars from a JSON manifest string.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Parse`] for invalid JSON, plus any
    /// validation error from [`Sidebars::new`].
    pub fn from_json_str(json: &str) -> Result<Self, SidebarError> {
        let sidebars: BTreeMap<String, Vec<SidebarItem>> = serde_json::from_str(json)?;
        Self::new(sidebars)
    }

    /// Load sidebars from a JSON manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Io`] if the file cannot be read, plus any
    /// error from [`Sidebars::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, SidebarError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Sidebar names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Items of a named sidebar.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[SidebarItem]> {
        self.sidebars.get(name).map(Vec::as_slice)
    }

    /// Doc ids of a named sidebar in reading order (depth-first).
    #[must_use]
    pub fn doc_ids(&self, name: &str) -> Option<Vec<&str>> {
        let items = self.sidebars.get(name)?;
        let mut ids = Vec::new();
        collect_doc_ids(items, &mut ids);
        Some(ids)
    }

    /// Name of the sidebar containing a doc id, if any.
    ///
    /// Drives which sidebar the UI shows next to a rendered page.
    #[must_use]
    pub fn sidebar_for_doc(&self, doc_id: &str) -> Option<&str> {
        self.sidebars
            .iter()
            .find(|(_, items)| contains_doc(items, doc_id))
            .map(|(name, _)| name.as_str())
    }
}

/// Reject categories with empty labels or no items, recursively.
fn validate_items(sidebar: &str, items: &[SidebarItem]) -> Result<(), SidebarError> {
    for item in items {
        if let SidebarItem::Category { label, items } = item {
            if label.is_empty() {
                return Err(SidebarError::EmptyLabel {
                    sidebar: sidebar.to_owned(),
                });
            }
            if items.is_empty() {
                return Err(SidebarError::EmptyCategory {
                    sidebar: sidebar.to_owned(),
                    label: label.clone(),
                });
            }
            validate_items(sidebar, items)?;
        }
    }
    Ok(())
}

/// Warn once per doc id that repeats within a sidebar.
fn warn_duplicate_docs(sidebar: &str, items: &[SidebarItem]) {
    let mut ids = Vec::new();
    collect_doc_ids(items, &mut ids);

    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            tracing::warn!(sidebar, doc = id, "doc id appears more than once in sidebar");
        }
    }
}

fn collect_doc_ids<'a>(items: &'a [SidebarItem], ids: &mut Vec<&'a str>) {
    for item in items {
        match item {
            SidebarItem::Doc(id) => ids.push(id),
            SidebarItem::Category { items, .. } => collect_doc_ids(items, ids),
        }
    }
}

fn contains_doc(items: &[SidebarItem], doc_id: &str) -> bool {
    items.iter().any(|item| match item {
        SidebarItem::Doc(id) => id == doc_id,
        SidebarItem::Category { items, .. } => contains_doc(items, doc_id),
    })
}
