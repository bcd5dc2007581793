//! Validated route table with first-match-wins resolution.
//!
//! The table is built once at startup from the generated manifest and is
//! immutable afterwards, so concurrent readers need no synchronization.
//! Resolution is a pure function over the table: it always returns either
//! a component identifier or `None`, never an error.

use std::collections::HashSet;
use std::path::Path;

use crate::entry::{ComponentId, RawRoute, RouteEntry};
use crate::normalize::{is_path_prefix, normalize_path};

/// Error raised while building a [`RouteTable`] from a manifest.
///
/// Construction is strict: a silently dropped or shadowed route is a
/// user-visible regression, so malformed entries are rejected rather
/// than skipped.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Entry has no path (or an empty one).
    #[error("route entry at position {index} is missing a path")]
    MissingPath {
        /// Position within its sibling sequence.
        index: usize,
    },
    /// Page entry has no component (or an empty one).
    #[error("route entry for {path} is missing a component")]
    MissingComponent {
        /// Normalized path of the offending entry.
        path: String,
    },
    /// Wildcard entry is not the last of its sibling sequence.
    #[error("wildcard route at position {index} must be the last entry; it shadows every later sibling")]
    WildcardNotLast {
        /// Position within its sibling sequence.
        index: usize,
    },
    /// Manifest JSON could not be parsed.
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Manifest file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable, ordered table of route entries.
///
/// Matching is first-match-wins in declared order, not most-specific:
/// declaration order is the only priority signal the manifest carries.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a validated table from raw manifest records.
    ///
    /// Entry paths are normalized, missing paths/components are rejected,
    /// and a wildcard anywhere but the last sibling position is rejected.
    /// Duplicate paths within a sibling sequence are allowed (first
    /// declared wins) but logged as a warning for build diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for malformed entries.
    pub fn new(raw: Vec<RawRoute>) -> Result<Self, ManifestError> {
        let entries = build_entries(raw)?;
        Ok(Self { entries })
    }

    /// Build a table from a JSON manifest string.
    ///
    /// The expected shape is the generated route manifest: an array of
    /// `{path, component, exact?, routes?}` records.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] for invalid JSON, or any
    /// validation error from [`RouteTable::new`].
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let raw: Vec<RawRoute> = serde_json::from_str(json)?;
        Self::new(raw)
    }

    /// Load a table from a JSON manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be read, plus any
    /// error from [`RouteTable::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Resolve a request path to the component that should render it.
    ///
    /// The request path is normalized (duplicate slashes collapsed,
    /// trailing slash stripped except for root) and matched against the
    /// entries in declared order:
    ///
    /// - the wildcard `*` matches any path and terminates the scan;
    /// - an exact entry matches on path equality;
    /// - a group entry matches when its path is a segment-boundary prefix
    ///   of the request, in which case its children are searched next. A
    ///   group whose children all miss falls through to its siblings,
    ///   unless the request is the group path itself and the group carries
    ///   its own component.
    ///
    /// Returns `None` when nothing matched. Absence of a match is a normal
    /// result, not an error; the caller decides how to render not-found.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> Option<&ComponentId> {
        let request = normalize_path(request_path);
        resolve_in(&self.entries, &request)
    }

    /// The validated top-level entries in declared order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries (every lookup misses).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate and normalize one sibling sequence of raw entries.
fn build_entries(raw: Vec<RawRoute>) -> Result<Vec<RouteEntry>, ManifestError> {
    let last = raw.len().checked_sub(1);
    let mut entries = Vec::with_capacity(raw.len());
    let mut seen_paths: HashSet<String> = HashSet::new();

    for (index, route) in raw.into_iter().enumerate() {
        let path = route
            .path
            .filter(|p| !p.is_empty())
            .ok_or(ManifestError::MissingPath { index })?;

        if path == "*" {
            if Some(index) != last {
                return Err(ManifestError::WildcardNotLast { index });
            }
            let component = require_component(route.component, &path)?;
            entries.push(RouteEntry {
                path,
                component: Some(component),
                exact: route.exact,
                children: Vec::new(),
            });
            continue;
        }

        let path = normalize_path(&path);
        if !seen_paths.insert(path.clone()) {
            tracing::warn!(path = %path, "duplicate route path; first declared entry wins");
        }

        let children = build_entries(route.children)?;

        // A group that scopes children may omit its own component; every
        // other entry without one is an unreachable or unrenderable route.
        let component = match route.component {
            Some(c) if !c.is_empty() => Some(c),
            _ if !route.exact && !children.is_empty() => None,
            _ => return Err(ManifestError::MissingComponent { path }),
        };

        entries.push(RouteEntry {
            path,
            component,
            exact: route.exact,
            children,
        });
    }

    Ok(entries)
}

fn require_component(
    component: Option<ComponentId>,
    path: &str,
) -> Result<ComponentId, ManifestError> {
    component
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ManifestError::MissingComponent {
            path: path.to_owned(),
        })
}

/// First-match-wins scan over one sibling sequence.
fn resolve_in<'a>(entries: &'a [RouteEntry], request: &str) -> Option<&'a ComponentId> {
    for entry in entries {
        if entry.is_wildcard() {
            return entry.component.as_ref();
        }
        if entry.exact {
            if entry.path == request {
                return entry.component.as_ref();
            }
        } else if is_path_prefix(&entry.path, request) {
            if let Some(component) = resolve_in(&entry.children, request) {
                return Some(component);
            }
            if entry.path == request
                && let Some(component) = entry.component.as_ref()
            {
                return Some(component);
            }
            // Group prefix alone is not a page match; keep scanning siblings.
        }
    }
    None
}
