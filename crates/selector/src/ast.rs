//! Defines the Abstract Syntax Tree (AST) for the supported CSS selector
//! grammar.

/// A full selector: one or more comma-separated alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub alternatives: Vec<Alternative>,
}

/// One comma-separated alternative of a selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    /// True when the alternative is anchored to the query root with a
    /// leading `:scope`.
    pub scoped: bool,
    pub segments: Vec<Segment>,
}

/// A compound selector plus the combinator attaching it to the previous
/// segment. The first segment of an alternative always carries
/// `Combinator::Descendant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub combinator: Combinator,
    pub compound: Compound,
    /// Set by the `$` marker: this segment's element is the one the query
    /// should return, even when deeper segments follow it.
    pub target: bool,
}

/// A structural relationship between two compound segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace.
    Descendant,
    /// `>`
    Child,
    /// `~`
    Sibling,
    /// `+`
    Adjacent,
}

/// A compound selector segment: an optional tag name plus simple selectors,
/// with no combinator inside it (e.g. `div.foo#bar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub parts: Vec<Component>,
}

impl Compound {
    /// True for a segment that is nothing but the `:scope` anchor.
    pub fn is_scope(&self) -> bool {
        self.tag.is_none() && self.parts.len() == 1 && self.parts[0] == Component::Scope
    }
}

/// A single simple selector inside a compound segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[name]` attribute presence
    Attr(String),
    /// `[name=value]` attribute equality (quotes around the value optional)
    AttrEq(String, String),
    /// Boolean-attribute pseudo-classes: `:checked`, `:disabled`,
    /// `:required`, `:autofocus`.
    Flag(String),
    /// `:autocomplete`
    Autocomplete,
    /// Input-kind shorthand (`:text`, `:password`, ...), matching
    /// `input[@type="..."]`.
    InputKind(String),
    /// `:contains(text)`
    ContainsText(String),
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:nth-child(k)`
    NthChild(u32),
    /// `:nth-last-child(k)`
    NthLastChild(u32),
    /// `:scope`
    Scope,
}
