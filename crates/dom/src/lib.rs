//! An arena-backed HTML document tree.
//!
//! HTML text is parsed with `html5ever` into a flat, immutable arena of
//! nodes whose ids are assigned in document pre-order. The [`NodeRef`]
//! handle implements [`htmlminer_xpath::DomNode`], so XPath expressions
//! evaluate directly over the arena.

pub mod parse;
pub mod tree;

pub use parse::parse;
pub use tree::{NodeRef, Tree};
