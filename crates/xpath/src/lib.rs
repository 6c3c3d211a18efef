//! A small XPath 1.0 evaluation engine for HTML node trees.
//!
//! The supported grammar is the relative-path subset produced by CSS
//! selector compilation: seven axes, name and wildcard node tests,
//! predicates, unions, and a handful of core functions. Evaluation is
//! written against the [`DomNode`] trait, so any tree with cheap `Copy`
//! node handles ordered by document position can back it.

pub mod ast;
pub mod axes;
pub mod engine;
pub mod error;
pub mod functions;
pub mod node;
pub mod operators;
pub mod parser;

pub use ast::{Axis, BinaryOperator, Expression, LocationPath, NodeTest, Step};
pub use engine::{EvaluationContext, Value, evaluate};
pub use error::XPathError;
pub use node::{DomNode, NodeType};
pub use parser::parse_expression;

// Re-export test utilities for integration testing in downstream crates.
pub use node::tests;
