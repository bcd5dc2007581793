//! Route entry types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a renderable unit.
///
/// The resolver never inspects the value; it is minted by the build step
/// and consumed by the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a component identifier from a token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the token is empty (treated as missing by validation).
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

/// Raw route record as emitted by the manifest generator.
///
/// All fields are optional so that malformed entries surface as
/// validation errors during [`RouteTable::new`](crate::RouteTable::new)
/// instead of being silently defaulted or dropped by serde.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRoute {
    /// URL path pattern, or the literal wildcard `*`.
    pub path: Option<String>,
    /// Component identifier for this route.
    pub component: Option<ComponentId>,
    /// Exact match (true) vs. prefix/group match (false).
    pub exact: bool,
    /// Nested sub-routes scoped under this entry's path.
    #[serde(rename = "routes")]
    pub children: Vec<RawRoute>,
}

impl RawRoute {
    /// Build a page route (exact match, no children).
    #[must_use]
    pub fn page(path: &str, component: &str) -> Self {
        Self {
            path: Some(path.to_owned()),
            component: Some(ComponentId::from(component)),
            exact: true,
            children: Vec::new(),
        }
    }

    /// Build a route group (prefix match with nested sub-routes).
    #[must_use]
    pub fn group(path: &str, component: Option<&str>, children: Vec<RawRoute>) -> Self {
        Self {
            path: Some(path.to_owned()),
            component: component.map(ComponentId::from),
            exact: false,
            children,
        }
    }

    /// Build the catch-all wildcard route.
    #[must_use]
    pub fn wildcard(component: &str) -> Self {
        Self {
            path: Some("*".to_owned()),
            component: Some(ComponentId::from(component)),
            exact: true,
            children: Vec::new(),
        }
    }
}

/// Validated, normalized route entry.
///
/// Produced only by table construction; paths are normalized and every
/// entry carries a component, except groups with children which may
/// scope sub-routes without rendering anything at the group path itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Normalized URL path, or the literal wildcard `*`.
    pub path: String,
    /// Component to render on match.
    ///
    /// `None` only for route groups that exist purely to scope children
    /// and have no directly renderable page at the group path itself.
    pub component: Option<ComponentId>,
    /// Exact match (true) vs. prefix/group match (false).
    pub exact: bool,
    /// Nested sub-routes, matched only after the group prefix matched.
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    /// True for the catch-all wildcard entry.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.path == "*"
    }
}
