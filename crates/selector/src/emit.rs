//! Emits XPath 1.0 expression text from a parsed selector AST.
//!
//! The output grammar is deliberately conservative: every alternative is a
//! relative location path starting with `descendant-or-self::` (or `.` when
//! anchored with `:scope`), alternatives are joined with `|`, and all
//! predicates are rendered in source order.

use crate::ast::{Alternative, Combinator, Component, Compound, Segment, SelectorList};

/// Renders a full selector list as a single XPath expression.
pub fn emit_xpath(list: &SelectorList) -> String {
    let rendered: Vec<String> = list.alternatives.iter().map(emit_alternative).collect();
    rendered.join("|")
}

fn emit_alternative(alternative: &Alternative) -> String {
    let mut out = String::new();
    if alternative.scoped {
        out.push('.');
    }

    for (index, segment) in alternative.segments.iter().enumerate() {
        if index == 0 && !alternative.scoped {
            out.push_str("descendant-or-self::");
        } else {
            out.push_str(match segment.combinator {
                Combinator::Descendant => "/descendant::",
                Combinator::Child => "/",
                Combinator::Sibling | Combinator::Adjacent => "/following-sibling::",
            });
        }
        emit_compound(&mut out, segment);
    }

    // The `$` marker asks for an ancestor of the innermost match; one
    // parent step is appended for every segment past the marked one.
    if let Some(target) = alternative.segments.iter().position(|s| s.target) {
        let hops = alternative.segments.len() - 1 - target;
        for _ in 0..hops {
            out.push_str("/..");
        }
    }

    out
}

fn emit_compound(out: &mut String, segment: &Segment) {
    let compound = &segment.compound;
    let tag = tag_name(compound);

    // A positional pseudo-class only introduces the `*/` child-context
    // wrapper when it is the compound's leading predicate and the segment
    // is not attached with `+` (which claims `[position()=1]` itself).
    if segment.combinator != Combinator::Adjacent {
        let wrapped = match compound.parts.first() {
            Some(Component::FirstChild) => {
                out.push_str("*/");
                out.push_str(tag);
                out.push_str("[position()=1]");
                true
            }
            Some(Component::LastChild) => {
                out.push_str("*/");
                out.push_str(tag);
                out.push_str("[position()=last()]");
                true
            }
            Some(Component::NthChild(k)) => {
                out.push_str("*/*");
                if tag == "*" {
                    out.push_str(&format!("[position()={k}]"));
                } else {
                    out.push_str(&format!("[position()={k} and self::{tag}]"));
                }
                true
            }
            _ => false,
        };
        if wrapped {
            for part in &compound.parts[1..] {
                emit_predicate(out, part);
            }
            return;
        }
    }

    out.push_str(tag);
    if segment.combinator == Combinator::Adjacent {
        out.push_str("[position()=1]");
    }
    for part in &compound.parts {
        emit_predicate(out, part);
    }
}

fn tag_name(compound: &Compound) -> &str {
    match &compound.tag {
        Some(tag) => tag,
        None => {
            let input_kind = compound
                .parts
                .iter()
                .any(|p| matches!(p, Component::InputKind(_)));
            if input_kind { "input" } else { "*" }
        }
    }
}

fn emit_predicate(out: &mut String, part: &Component) {
    match part {
        Component::Id(id) => out.push_str(&format!("[@id=\"{id}\"]")),
        Component::Class(class) => out.push_str(&format!(
            "[contains(concat(\" \",@class,\" \"),\" {class} \")]"
        )),
        Component::Attr(name) => out.push_str(&format!("[@{name}]")),
        Component::AttrEq(name, value) => out.push_str(&format!("[@{name}=\"{value}\"]")),
        Component::Flag(flag) => out.push_str(&format!("[@{flag}=\"{flag}\"]")),
        Component::Autocomplete => out.push_str("[@autocomplete=\"on\"]"),
        Component::InputKind(kind) => out.push_str(&format!("[@type=\"{kind}\"]")),
        Component::ContainsText(text) => {
            out.push_str(&format!("[contains(string(.),\"{text}\")]"));
        }
        // Positional pseudo-classes that did not earn the `*/` wrapper
        // degrade to a plain positional predicate in source position.
        Component::FirstChild => out.push_str("[position()=1]"),
        Component::LastChild => out.push_str("[position()=last()]"),
        Component::NthChild(k) => out.push_str(&format!("[position()={k}]")),
        Component::NthLastChild(k) => {
            out.push_str(&format!("[position()=(last() - ({k} - 1))]"));
        }
        Component::Scope => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_selector;

    fn xpath(selector: &str) -> String {
        emit_xpath(&parse_selector(selector).unwrap())
    }

    #[test]
    fn conformance_table() {
        assert_eq!(xpath("div"), "descendant-or-self::div");
        assert_eq!(xpath("#foo"), "descendant-or-self::*[@id=\"foo\"]");
        assert_eq!(
            xpath("div.foo"),
            "descendant-or-self::div[contains(concat(\" \",@class,\" \"),\" foo \")]"
        );
        assert_eq!(xpath("ul > li"), "descendant-or-self::ul/li");
        assert_eq!(
            xpath("a:contains(Next)"),
            "descendant-or-self::a[contains(string(.),\"Next\")]"
        );
        assert_eq!(
            xpath("input:checked"),
            "descendant-or-self::input[@checked=\"checked\"]"
        );
    }

    #[test]
    fn descendant_and_sibling_combinators() {
        assert_eq!(xpath("div p"), "descendant-or-self::div/descendant::p");
        assert_eq!(
            xpath("ul ~ li"),
            "descendant-or-self::ul/following-sibling::li"
        );
        assert_eq!(
            xpath("ul + li"),
            "descendant-or-self::ul/following-sibling::li[position()=1]"
        );
    }

    #[test]
    fn universal_selector() {
        assert_eq!(xpath("*"), "descendant-or-self::*");
        assert_eq!(xpath("div > *"), "descendant-or-self::div/*");
    }

    #[test]
    fn alternatives_join_with_union() {
        assert_eq!(
            xpath("div, p"),
            "descendant-or-self::div|descendant-or-self::p"
        );
    }

    #[test]
    fn positional_pseudo_classes() {
        assert_eq!(
            xpath("li:first-child"),
            "descendant-or-self::*/li[position()=1]"
        );
        assert_eq!(
            xpath("li:last-child"),
            "descendant-or-self::*/li[position()=last()]"
        );
        assert_eq!(
            xpath(":first-child"),
            "descendant-or-self::*/*[position()=1]"
        );
        assert_eq!(
            xpath("li:nth-child(2)"),
            "descendant-or-self::*/*[position()=2 and self::li]"
        );
        assert_eq!(
            xpath(":nth-child(2)"),
            "descendant-or-self::*/*[position()=2]"
        );
        assert_eq!(
            xpath("li:nth-last-child(2)"),
            "descendant-or-self::li[position()=(last() - (2 - 1))]"
        );
        assert_eq!(
            xpath("ul > li:first-child"),
            "descendant-or-self::ul/*/li[position()=1]"
        );
    }

    #[test]
    fn positional_after_another_predicate_degrades() {
        assert_eq!(
            xpath("li.item:first-child"),
            "descendant-or-self::li[contains(concat(\" \",@class,\" \"),\" item \")][position()=1]"
        );
        assert_eq!(
            xpath("div#foo:last-child"),
            "descendant-or-self::div[@id=\"foo\"][position()=last()]"
        );
    }

    #[test]
    fn attribute_forms() {
        assert_eq!(xpath("a[href]"), "descendant-or-self::a[@href]");
        assert_eq!(xpath("[href]"), "descendant-or-self::*[@href]");
        assert_eq!(
            xpath("a[rel=nofollow]"),
            "descendant-or-self::a[@rel=\"nofollow\"]"
        );
        assert_eq!(
            xpath("[rel='nofollow']"),
            "descendant-or-self::*[@rel=\"nofollow\"]"
        );
    }

    #[test]
    fn form_pseudo_classes() {
        assert_eq!(
            xpath(":checked"),
            "descendant-or-self::*[@checked=\"checked\"]"
        );
        assert_eq!(
            xpath("input:autocomplete"),
            "descendant-or-self::input[@autocomplete=\"on\"]"
        );
        assert_eq!(
            xpath(":email"),
            "descendant-or-self::input[@type=\"email\"]"
        );
        assert_eq!(
            xpath("input:text"),
            "descendant-or-self::input[@type=\"text\"]"
        );
    }

    #[test]
    fn compound_predicates_render_in_source_order() {
        assert_eq!(
            xpath("div#foo.bar"),
            "descendant-or-self::div[@id=\"foo\"][contains(concat(\" \",@class,\" \"),\" bar \")]"
        );
    }

    #[test]
    fn scope_anchoring() {
        assert_eq!(xpath(":scope"), ".");
        assert_eq!(xpath(":scope div"), "./descendant::div");
        assert_eq!(xpath(":scope > div"), "./div");
    }

    #[test]
    fn target_marker_appends_parent_steps() {
        assert_eq!(
            xpath("table $tr td"),
            "descendant-or-self::table/descendant::tr/descendant::td/.."
        );
        assert_eq!(
            xpath("div $a b c"),
            "descendant-or-self::div/descendant::a/descendant::b/descendant::c/../.."
        );
        assert_eq!(xpath("div $a"), "descendant-or-self::div/descendant::a");
    }
}
