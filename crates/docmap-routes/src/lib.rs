//! Route manifest model and resolution for docmap.
//!
//! A static-site build emits a route manifest: an ordered list of
//! `{path, component, exact, routes}` records mapping URL paths to
//! pre-built component identifiers, with nested route groups and an
//! optional wildcard fallback. This crate models that manifest as an
//! immutable [`RouteTable`] and answers the one runtime question the
//! manifest exists for: given a request path, which component renders?
//!
//! # Example
//!
//! ```
//! use docmap_routes::RouteTable;
//!
//! let table = RouteTable::from_json_str(
//!     r#"[
//!         {"path": "/", "component": "deb", "exact": true},
//!         {"path": "*", "component": "404"}
//!     ]"#,
//! )?;
//!
//! assert_eq!(table.resolve("/").map(|c| c.as_str()), Some("deb"));
//! assert_eq!(table.resolve("/missing").map(|c| c.as_str()), Some("404"));
//! # Ok::<(), docmap_routes::ManifestError>(())
//! ```

mod entry;
mod normalize;
mod table;

pub use entry::{ComponentId, RawRoute, RouteEntry};
pub use normalize::normalize_path;
pub use table::{ManifestError, RouteTable};
