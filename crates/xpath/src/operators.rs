//! Implements the binary operators of the supported XPath subset.

use crate::ast::BinaryOperator;
use crate::engine::Value;
use crate::error::XPathError;
use crate::node::DomNode;
use std::collections::HashSet;

/// Applies a binary operator to two evaluated values.
pub fn evaluate<'a, N: DomNode<'a>>(
    op: BinaryOperator,
    left: Value<N>,
    right: Value<N>,
) -> Result<Value<N>, XPathError> {
    match op {
        BinaryOperator::Or => Ok(Value::Boolean(left.to_bool() || right.to_bool())),
        BinaryOperator::And => Ok(Value::Boolean(left.to_bool() && right.to_bool())),
        BinaryOperator::Equals => Ok(Value::Boolean(compare_equals(&left, &right))),
        BinaryOperator::NotEquals => Ok(Value::Boolean(!compare_equals(&left, &right))),
        BinaryOperator::Plus => Ok(Value::Number(left.to_number() + right.to_number())),
        BinaryOperator::Minus => Ok(Value::Number(left.to_number() - right.to_number())),
        BinaryOperator::Union => union(left, right),
    }
}

/// XPath 1.0 equality: a node-set compares true when any of its nodes'
/// string values satisfies the comparison against the other operand.
fn compare_equals<'a, N: DomNode<'a>>(left: &Value<N>, right: &Value<N>) -> bool {
    match (left, right) {
        (Value::NodeSet(left_nodes), Value::NodeSet(right_nodes)) => {
            let right_values: HashSet<String> =
                right_nodes.iter().map(|n| n.string_value()).collect();
            left_nodes
                .iter()
                .any(|n| right_values.contains(&n.string_value()))
        }
        (Value::NodeSet(nodes), Value::Number(n)) | (Value::Number(n), Value::NodeSet(nodes)) => {
            nodes
                .iter()
                .any(|node| node.string_value().trim().parse::<f64>().is_ok_and(|v| v == *n))
        }
        (Value::NodeSet(nodes), Value::String(s)) | (Value::String(s), Value::NodeSet(nodes)) => {
            nodes.iter().any(|node| node.string_value() == *s)
        }
        (Value::NodeSet(_), Value::Boolean(b)) | (Value::Boolean(b), Value::NodeSet(_)) => {
            // Compare the node-set's truthiness against the boolean.
            let node_set = if matches!(left, Value::NodeSet(_)) {
                left
            } else {
                right
            };
            node_set.to_bool() == *b
        }
        (Value::Boolean(_), _) | (_, Value::Boolean(_)) => left.to_bool() == right.to_bool(),
        (Value::Number(_), _) | (_, Value::Number(_)) => left.to_number() == right.to_number(),
        (Value::String(a), Value::String(b)) => a == b,
    }
}

/// Merges two node-sets, deduplicated and in document order.
fn union<'a, N: DomNode<'a>>(left: Value<N>, right: Value<N>) -> Result<Value<N>, XPathError> {
    match (left, right) {
        (Value::NodeSet(mut left_nodes), Value::NodeSet(right_nodes)) => {
            let mut seen: HashSet<N> = left_nodes.iter().copied().collect();
            for node in right_nodes {
                if seen.insert(node) {
                    left_nodes.push(node);
                }
            }
            left_nodes.sort();
            Ok(Value::NodeSet(left_nodes))
        }
        _ => Err(XPathError::Type(
            "Operands of '|' must be node-sets".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::tests::{MockNode, create_test_tree};

    #[test]
    fn equality_coerces_node_sets() {
        let tree = create_test_tree();
        let id_attr = MockNode { id: 4, tree: &tree };

        let set: Value<MockNode> = Value::NodeSet(vec![id_attr]);
        assert!(compare_equals(&set, &Value::String("menu".to_string())));
        assert!(!compare_equals(&set, &Value::String("other".to_string())));

        let empty: Value<MockNode> = Value::NodeSet(vec![]);
        assert!(!compare_equals(&empty, &Value::String("menu".to_string())));
        assert!(compare_equals(&empty, &Value::Boolean(false)));
    }

    #[test]
    fn union_sorts_and_deduplicates() {
        let tree = create_test_tree();
        let ul = MockNode { id: 3, tree: &tree };
        let p = MockNode { id: 13, tree: &tree };

        let result = union(
            Value::NodeSet(vec![p, ul]),
            Value::NodeSet(vec![ul]),
        )
        .unwrap();
        match result {
            Value::NodeSet(nodes) => {
                assert_eq!(nodes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 13]);
            }
            other => panic!("Expected a NodeSet, got {:?}", other),
        }
    }

    #[test]
    fn disjunction_addition_and_inequality() {
        let or: Value<MockNode> = evaluate(
            BinaryOperator::Or,
            Value::Boolean(false),
            Value::Number(1.0),
        )
        .unwrap();
        assert!(or.to_bool());

        let sum: Value<MockNode> = evaluate(
            BinaryOperator::Plus,
            Value::Number(2.0),
            Value::String("3".to_string()),
        )
        .unwrap();
        match sum {
            Value::Number(n) => assert_eq!(n, 5.0),
            other => panic!("Expected a Number, got {:?}", other),
        }

        let ne: Value<MockNode> = evaluate(
            BinaryOperator::NotEquals,
            Value::String("alpha".to_string()),
            Value::String("beta".to_string()),
        )
        .unwrap();
        assert!(ne.to_bool());
    }

    #[test]
    fn arithmetic_coerces_to_numbers() {
        let result: Value<MockNode> = evaluate(
            BinaryOperator::Minus,
            Value::Number(5.0),
            Value::String("2".to_string()),
        )
        .unwrap();
        match result {
            Value::Number(n) => assert_eq!(n, 3.0),
            other => panic!("Expected a Number, got {:?}", other),
        }
    }
}
