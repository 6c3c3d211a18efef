//! Compiles CSS selector text into XPath 1.0 expression strings.
//!
//! Selectors are parsed into an explicit AST and re-emitted structurally;
//! compiled strings are memoized process-wide, keyed by the raw selector
//! text.

pub mod ast;
pub mod cache;
pub mod emit;
pub mod error;
pub mod parser;

pub use ast::{Alternative, Combinator, Component, Compound, Segment, SelectorList};
pub use cache::{compile, compiled_count};
pub use error::SelectorError;
pub use parser::parse_selector;
