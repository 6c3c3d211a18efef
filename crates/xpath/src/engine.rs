//! The evaluation engine for executing a parsed XPath AST against a
//! generic `DomNode` tree.

use super::ast::{Axis, Expression, LocationPath, NodeTest, Step};
use super::{axes, functions, operators};
use crate::error::XPathError;
use crate::node::{DomNode, NodeType};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

/// Represents the possible result types of an XPath expression evaluation.
#[derive(Debug, Clone)]
pub enum Value<N> {
    NodeSet(Vec<N>),
    String(String),
    Number(f64),
    Boolean(bool),
}

impl<'a, N: DomNode<'a>> Value<N> {
    /// Coerces the XPath value to a boolean as per XPath 1.0 rules.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::NodeSet(nodes) => !nodes.is_empty(),
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Boolean(b) => *b,
        }
    }

    /// Coerces the XPath value to a number as per XPath 1.0 rules.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::NodeSet(nodes) => {
                let s = nodes.first().map(|n| n.string_value()).unwrap_or_default();
                s.trim().parse().unwrap_or(f64::NAN)
            }
        }
    }
}

impl<'a, N: DomNode<'a>> fmt::Display for Value<N> {
    /// Coerces the XPath value to a string as per XPath 1.0 rules.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::NodeSet(nodes) => write!(
                f,
                "{}",
                nodes.first().map(|n| n.string_value()).unwrap_or_default()
            ),
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A container for the state needed during expression evaluation.
/// `'a` is the lifetime of the underlying tree.
pub struct EvaluationContext<'a, N: DomNode<'a>> {
    pub context_node: N,
    pub context_position: usize, // 1-based index
    pub context_size: usize,
    _marker: PhantomData<&'a ()>,
}

impl<'a, N: DomNode<'a>> EvaluationContext<'a, N> {
    pub fn new(context_node: N, context_position: usize, context_size: usize) -> Self {
        Self {
            context_node,
            context_position,
            context_size,
            _marker: PhantomData,
        }
    }
}

/// Evaluates a compiled expression and returns a concrete `Value`.
pub fn evaluate<'a, N>(
    expr: &Expression,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Value<N>, XPathError>
where
    N: DomNode<'a> + 'a,
{
    match expr {
        Expression::Literal(s) => Ok(Value::String(s.clone())),
        Expression::Number(n) => Ok(Value::Number(*n)),
        Expression::LocationPath(path) => {
            let nodes = evaluate_location_path(path, e_ctx)?;
            Ok(Value::NodeSet(nodes))
        }
        Expression::FunctionCall { name, args } => {
            let mut evaluated_args = Vec::with_capacity(args.len());
            for arg in args {
                evaluated_args.push(evaluate(arg, e_ctx)?);
            }
            functions::evaluate_function(name, evaluated_args, e_ctx)
        }
        Expression::BinaryOp { left, op, right } => {
            let left_val = evaluate(left, e_ctx)?;
            let right_val = evaluate(right, e_ctx)?;
            operators::evaluate(*op, left_val, right_val)
        }
    }
}

fn evaluate_location_path<'a, N>(
    path: &LocationPath,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Vec<N>, XPathError>
where
    N: DomNode<'a> + 'a,
{
    let mut current_nodes = vec![e_ctx.context_node];
    for step in &path.steps {
        current_nodes = evaluate_step(step, &current_nodes)?;
    }
    Ok(current_nodes)
}

/// Evaluates a single location step.
///
/// Each context node is expanded to its own candidate list before the
/// predicates run, so that `position()` and `last()` count positions
/// within one context node's candidates. Merging the axis results first
/// would make `li[position()=1]` mean "first li overall" instead of
/// "first li under each parent". The per-context results are then merged,
/// deduplicated, and restored to document order.
fn evaluate_step<'a, N>(step: &Step, context_nodes: &[N]) -> Result<Vec<N>, XPathError>
where
    N: DomNode<'a> + 'a,
{
    let mut results = Vec::new();
    let mut seen = HashSet::new();

    for &node in context_nodes {
        let axis_nodes = collect_axis_nodes(step.axis, node);
        let tested_nodes = filter_by_node_test(&axis_nodes, &step.node_test, step.axis);
        let kept = apply_predicates(&tested_nodes, &step.predicates)?;
        for n in kept {
            if seen.insert(n) {
                results.push(n);
            }
        }
    }

    results.sort();
    Ok(results)
}

/// Stage 1: Collects all unique nodes reachable from one context node
/// along a given axis.
fn collect_axis_nodes<'a, N>(axis: Axis, node: N) -> Vec<N>
where
    N: DomNode<'a> + 'a,
{
    let mut result_nodes = Vec::new();
    let mut seen = HashSet::new();

    match axis {
        Axis::Child => axes::collect_child_nodes(node, &mut seen, &mut result_nodes),
        Axis::Attribute => axes::collect_attribute_nodes(node, &mut seen, &mut result_nodes),
        Axis::Descendant => axes::collect_descendant_nodes(node, &mut seen, &mut result_nodes),
        Axis::DescendantOrSelf => {
            axes::collect_descendant_or_self_nodes(node, &mut seen, &mut result_nodes)
        }
        Axis::Parent => axes::collect_parent_nodes(node, &mut seen, &mut result_nodes),
        Axis::SelfAxis => axes::collect_self_nodes(node, &mut seen, &mut result_nodes),
        Axis::FollowingSibling => {
            axes::collect_following_sibling_nodes(node, &mut seen, &mut result_nodes)
        }
    }
    result_nodes
}

/// Stage 2: Filters a set of nodes based on a `NodeTest`.
fn filter_by_node_test<'a, N>(nodes: &[N], test: &NodeTest, axis: Axis) -> Vec<N>
where
    N: DomNode<'a> + 'a,
{
    nodes
        .iter()
        .filter(|&node| match test {
            NodeTest::Wildcard => match axis {
                Axis::Attribute => node.node_type() == NodeType::Attribute,
                _ => node.node_type() == NodeType::Element,
            },
            NodeTest::Name(name_to_test) => {
                node.name().is_some_and(|name| name == name_to_test.as_str())
            }
            NodeTest::AnyNode => true,
        })
        .copied()
        .collect()
}

/// Stage 3: Filters one context node's candidates by applying a series
/// of predicates.
fn apply_predicates<'a, N>(nodes: &[N], predicates: &[Expression]) -> Result<Vec<N>, XPathError>
where
    N: DomNode<'a> + 'a,
{
    let mut final_nodes = nodes.to_vec();
    for predicate in predicates {
        let mut predicate_results = Vec::new();
        let context_size = final_nodes.len();
        for (i, node) in final_nodes.iter().enumerate() {
            let predicate_e_ctx = EvaluationContext::new(*node, i + 1, context_size);
            let result = evaluate(predicate, &predicate_e_ctx)?;
            // A bare number predicate selects by position.
            let keep = match result {
                Value::Number(n) => (n as usize) == (i + 1),
                _ => result.to_bool(),
            };
            if keep {
                predicate_results.push(*node);
            }
        }
        final_nodes = predicate_results;
    }
    Ok(final_nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::tests::{MockNode, MockTree, create_test_tree};
    use crate::parser::parse_expression;

    fn root_ctx(tree: &MockTree) -> EvaluationContext<'_, MockNode<'_>> {
        EvaluationContext::new(MockNode { id: 0, tree }, 1, 1)
    }

    fn eval_ids(tree: &MockTree, expr: &str) -> Vec<usize> {
        let parsed = parse_expression(expr).unwrap();
        match evaluate(&parsed, &root_ctx(tree)).unwrap() {
            Value::NodeSet(nodes) => nodes.iter().map(|n| n.id).collect(),
            other => panic!("Expected a NodeSet, got {:?}", other),
        }
    }

    #[test]
    fn selects_descendants_by_name() {
        let tree = create_test_tree();
        assert_eq!(eval_ids(&tree, "descendant-or-self::li"), vec![5, 8, 11]);
        assert_eq!(eval_ids(&tree, "descendant-or-self::ul/li"), vec![5, 8, 11]);
    }

    #[test]
    fn selects_by_attribute_value() {
        let tree = create_test_tree();
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::*[@id=\"menu\"]"),
            vec![3]
        );
        assert_eq!(eval_ids(&tree, "descendant-or-self::*[@id=\"nope\"]"), vec![]);
    }

    #[test]
    fn selects_by_class_token() {
        let tree = create_test_tree();
        assert_eq!(
            eval_ids(
                &tree,
                "descendant-or-self::li[contains(concat(\" \",@class,\" \"),\" item \")]"
            ),
            vec![5, 8]
        );
    }

    #[test]
    fn position_counts_within_each_context_node() {
        let tree = create_test_tree();
        // Only the ul has li children, and only its first qualifies.
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::*/li[position()=1]"),
            vec![5]
        );
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::*/li[position()=last()]"),
            vec![11]
        );
    }

    #[test]
    fn nth_child_conjunction() {
        let tree = create_test_tree();
        // Position 2 among the body's children is the p, which fails
        // self::li; position 2 among the ul's children passes.
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::*/*[position()=2 and self::li]"),
            vec![8]
        );
    }

    #[test]
    fn nth_last_child_arithmetic() {
        let tree = create_test_tree();
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::li[position()=(last() - (2 - 1))]"),
            vec![8]
        );
    }

    #[test]
    fn following_siblings() {
        let tree = create_test_tree();
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::ul/following-sibling::*"),
            vec![13, 15]
        );
        assert_eq!(
            eval_ids(
                &tree,
                "descendant-or-self::ul/following-sibling::p[position()=1]"
            ),
            vec![13]
        );
    }

    #[test]
    fn union_merges_in_document_order() {
        let tree = create_test_tree();
        assert_eq!(
            eval_ids(
                &tree,
                "descendant-or-self::p|descendant-or-self::ul"
            ),
            vec![3, 13]
        );
        assert_eq!(eval_ids(&tree, "descendant-or-self::a"), vec![]);
    }

    #[test]
    fn scoped_path_from_inner_context() {
        let tree = create_test_tree();
        let body = MockNode { id: 2, tree: &tree };
        let ctx = EvaluationContext::new(body, 1, 1);
        let expr = parse_expression("./descendant::li").unwrap();
        match evaluate(&expr, &ctx).unwrap() {
            Value::NodeSet(nodes) => {
                assert_eq!(nodes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![5, 8, 11]);
            }
            other => panic!("Expected a NodeSet, got {:?}", other),
        }
    }

    #[test]
    fn parent_step_deduplicates() {
        let tree = create_test_tree();
        assert_eq!(eval_ids(&tree, "descendant-or-self::ul/li/.."), vec![3]);
    }

    #[test]
    fn text_matching_with_contains() {
        let tree = create_test_tree();
        assert_eq!(
            eval_ids(&tree, "descendant-or-self::li[contains(string(.),\"Bet\")]"),
            vec![8]
        );
    }

    #[test]
    fn count_function() {
        let tree = create_test_tree();
        let expr = parse_expression("count(descendant-or-self::li)").unwrap();
        match evaluate(&expr, &root_ctx(&tree)).unwrap() {
            Value::Number(n) => assert_eq!(n, 3.0),
            other => panic!("Expected a Number, got {:?}", other),
        }
    }
}
