//! Built-in implementations for the supported XPath 1.0 core functions.

use super::engine::{EvaluationContext, Value};
use crate::error::XPathError;
use crate::node::DomNode;

/// Dispatches a function call to the correct implementation.
pub fn evaluate_function<'a, N: DomNode<'a>>(
    name: &str,
    args: Vec<Value<N>>,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Value<N>, XPathError> {
    match name {
        // Node-set
        "position" => func_position(args, e_ctx),
        "last" => func_last(args, e_ctx),
        "count" => func_count(args),

        // String
        "string" => func_string(args, e_ctx),
        "concat" => func_concat(args),
        "contains" => func_contains(args),
        "normalize-space" => func_normalize_space(args, e_ctx),

        // Boolean
        "not" => func_not(args),

        _ => Err(XPathError::Function {
            function: name.to_string(),
            message: "Unknown XPath function".to_string(),
        }),
    }
}

fn func_position<'a, N: DomNode<'a>>(
    args: Vec<Value<N>>,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Value<N>, XPathError> {
    if !args.is_empty() {
        return Err(XPathError::Function {
            function: "position()".to_string(),
            message: "Expected no arguments".to_string(),
        });
    }
    Ok(Value::Number(e_ctx.context_position as f64))
}

fn func_last<'a, N: DomNode<'a>>(
    args: Vec<Value<N>>,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Value<N>, XPathError> {
    if !args.is_empty() {
        return Err(XPathError::Function {
            function: "last()".to_string(),
            message: "Expected no arguments".to_string(),
        });
    }
    Ok(Value::Number(e_ctx.context_size as f64))
}

fn func_count<'a, N: DomNode<'a>>(mut args: Vec<Value<N>>) -> Result<Value<N>, XPathError> {
    if args.len() != 1 {
        return Err(XPathError::Function {
            function: "count()".to_string(),
            message: "Expected 1 argument".to_string(),
        });
    }
    match args.remove(0) {
        Value::NodeSet(nodes) => Ok(Value::Number(nodes.len() as f64)),
        v => Err(XPathError::Type(format!(
            "count() argument must be a node-set, got {:?}",
            v
        ))),
    }
}

fn func_string<'a, N: DomNode<'a>>(
    mut args: Vec<Value<N>>,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Value<N>, XPathError> {
    if args.len() > 1 {
        return Err(XPathError::Function {
            function: "string()".to_string(),
            message: "Expected 0 or 1 arguments".to_string(),
        });
    }
    let s = if args.is_empty() {
        e_ctx.context_node.string_value()
    } else {
        args.remove(0).to_string()
    };
    Ok(Value::String(s))
}

fn func_concat<'a, N: DomNode<'a>>(args: Vec<Value<N>>) -> Result<Value<N>, XPathError> {
    if args.len() < 2 {
        return Err(XPathError::Function {
            function: "concat()".to_string(),
            message: "Expected at least 2 arguments".to_string(),
        });
    }
    let mut result = String::new();
    for arg in args {
        result.push_str(&arg.to_string());
    }
    Ok(Value::String(result))
}

fn func_contains<'a, N: DomNode<'a>>(mut args: Vec<Value<N>>) -> Result<Value<N>, XPathError> {
    if args.len() != 2 {
        return Err(XPathError::Function {
            function: "contains()".to_string(),
            message: "Expected 2 arguments".to_string(),
        });
    }
    let needle = args.remove(1).to_string();
    let haystack = args.remove(0).to_string();
    Ok(Value::Boolean(haystack.contains(&needle)))
}

fn func_normalize_space<'a, N: DomNode<'a>>(
    mut args: Vec<Value<N>>,
    e_ctx: &EvaluationContext<'a, N>,
) -> Result<Value<N>, XPathError> {
    if args.len() > 1 {
        return Err(XPathError::Function {
            function: "normalize-space()".to_string(),
            message: "Expected 0 or 1 arguments".to_string(),
        });
    }
    let s = if args.is_empty() {
        e_ctx.context_node.string_value()
    } else {
        args.remove(0).to_string()
    };
    let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(Value::String(normalized))
}

fn func_not<'a, N: DomNode<'a>>(mut args: Vec<Value<N>>) -> Result<Value<N>, XPathError> {
    if args.len() != 1 {
        return Err(XPathError::Function {
            function: "not()".to_string(),
            message: "Expected 1 argument".to_string(),
        });
    }
    let value = args.remove(0);
    Ok(Value::Boolean(!value.to_bool()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::node::tests::{MockNode, create_test_tree};
    use crate::parser::parse_expression;

    fn eval_at_node(id: usize, expr: &str) -> String {
        let tree = create_test_tree();
        let node = MockNode { id, tree: &tree };
        let ctx = EvaluationContext::new(node, 1, 1);
        let parsed = parse_expression(expr).unwrap();
        evaluate(&parsed, &ctx).unwrap().to_string()
    }

    #[test]
    fn string_of_context_node() {
        assert_eq!(eval_at_node(8, "string(.)"), "Beta");
        assert_eq!(eval_at_node(3, "string(.)"), "AlphaBetaGamma");
    }

    #[test]
    fn concat_and_contains() {
        assert_eq!(eval_at_node(0, "concat(\"a\",\"b\",\"c\")"), "abc");
        assert_eq!(
            eval_at_node(5, "contains(concat(\" \",@class,\" \"),\" item \")"),
            "true"
        );
        assert_eq!(
            eval_at_node(11, "contains(concat(\" \",@class,\" \"),\" item \")"),
            "false"
        );
    }

    #[test]
    fn normalize_space_collapses_runs() {
        assert_eq!(
            eval_at_node(0, "normalize-space(\"  a   b \")"),
            "a b"
        );
    }

    #[test]
    fn not_inverts_truthiness() {
        assert_eq!(eval_at_node(15, "not(descendant-or-self::li)"), "true");
        assert_eq!(eval_at_node(3, "not(descendant-or-self::li)"), "false");
    }

    #[test]
    fn unknown_function_is_an_error() {
        let tree = create_test_tree();
        let ctx = EvaluationContext::new(MockNode { id: 0, tree: &tree }, 1, 1);
        let parsed = parse_expression("starts-with(\"ab\",\"a\")").unwrap();
        assert!(evaluate(&parsed, &ctx).is_err());
    }
}
