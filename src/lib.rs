//! Query HTML documents with CSS selectors compiled to XPath.
//!
//! Selectors are compiled once (and memoized) into XPath expressions,
//! which are then evaluated against an immutable arena-backed DOM. The
//! wrapper types mirror the shape of the query results: a [`Document`]
//! yields [`NodeHandle`]s and [`NodeList`]s, and grouped queries yield a
//! [`GroupedNodeList`] of labelled [`Group`]s.
//!
//! ```
//! use htmlminer::Document;
//!
//! let doc = Document::parse(
//!     "<ul><li class=\"item\">Alpha</li><li class=\"item\">Beta</li><li>Gamma</li></ul>",
//! );
//!
//! let items = doc.find_all("ul > li.item");
//! assert_eq!(items.len(), 2);
//!
//! let first = doc.find_first("li:first-child").unwrap();
//! assert_eq!(first.text(), "Alpha");
//! assert_eq!(first.get("class").as_deref(), Some("item"));
//! ```

pub mod document;
pub mod error;
pub mod group;
pub mod list;
pub mod node;

pub use document::Document;
pub use error::Error;
pub use group::{Group, GroupCursor, GroupedNodeList};
pub use list::{Cursor, NodeList};
pub use node::NodeHandle;

// The selector compiler is useful on its own when feeding other XPath
// consumers.
pub use htmlminer_selector::compile as css_to_xpath;
