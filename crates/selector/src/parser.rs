//! Parses CSS selector text into the [`crate::ast`] types using `nom`.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{map, map_res, opt, verify};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

use crate::ast::{Alternative, Combinator, Component, Compound, Segment, SelectorList};
use crate::error::SelectorError;

/// `<input type="...">` shorthands accepted as pseudo-classes.
const INPUT_KINDS: &[&str] = &[
    "text",
    "password",
    "checkbox",
    "radio",
    "submit",
    "reset",
    "file",
    "hidden",
    "image",
    "button",
    "color",
    "date",
    "datetime",
    "datetime-local",
    "email",
    "month",
    "number",
    "range",
    "search",
    "tel",
    "time",
    "url",
    "week",
];

/// A combinator that consumes whitespace around an inner parser.
fn ws<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a selector, failing on empty input or trailing garbage.
pub fn parse_selector(input: &str) -> Result<SelectorList, SelectorError> {
    match selector_list(input.trim()) {
        Ok(("", list)) => Ok(list),
        Ok((rest, _)) => Err(SelectorError::Parse(
            input.to_string(),
            format!("unexpected trailing input '{rest}'"),
        )),
        Err(e) => Err(SelectorError::Parse(input.to_string(), e.to_string())),
    }
}

fn selector_list(input: &str) -> IResult<&str, SelectorList> {
    map(
        separated_list1(ws(char(',')), alternative),
        |alternatives| SelectorList { alternatives },
    )
    .parse(input)
}

fn alternative(input: &str) -> IResult<&str, Alternative> {
    let (input, first) = segment_head(input)?;
    let (input, rest) = many0((combinator, opt(char('$')), compound)).parse(input)?;

    let mut segments = vec![first];
    for (comb, marker, comp) in rest {
        segments.push(Segment {
            combinator: comb,
            compound: comp,
            target: marker.is_some(),
        });
    }

    // A leading bare `:scope` anchors the alternative to the query root
    // rather than matching an element of its own.
    let scoped = segments
        .first()
        .is_some_and(|s| s.compound.is_scope() && !s.target);
    if scoped {
        segments.remove(0);
    }

    Ok((input, Alternative { scoped, segments }))
}

fn segment_head(input: &str) -> IResult<&str, Segment> {
    let (input, marker) = opt(char('$')).parse(input)?;
    let (input, comp) = compound(input)?;
    Ok((
        input,
        Segment {
            combinator: Combinator::Descendant,
            compound: comp,
            target: marker.is_some(),
        },
    ))
}

fn combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        map(ws(char('>')), |_| Combinator::Child),
        map(ws(char('~')), |_| Combinator::Sibling),
        map(ws(char('+')), |_| Combinator::Adjacent),
        map(multispace1, |_| Combinator::Descendant),
    ))
    .parse(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    let (input, tag) = opt(tag_name).parse(input)?;
    let (input, parts) = many0(component).parse(input)?;
    if tag.is_none() && parts.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((
        input,
        Compound {
            tag: tag.map(str::to_string),
            parts,
        },
    ))
}

fn component(input: &str) -> IResult<&str, Component> {
    alt((id_selector, class_selector, attr_selector, pseudo_class)).parse(input)
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

/// A tag name or the universal selector.
fn tag_name(input: &str) -> IResult<&str, &str> {
    alt((ident, tag("*"))).parse(input)
}

fn id_selector(input: &str) -> IResult<&str, Component> {
    map(preceded(char('#'), ident), |id| {
        Component::Id(id.to_string())
    })
    .parse(input)
}

fn class_selector(input: &str) -> IResult<&str, Component> {
    map(preceded(char('.'), ident), |class| {
        Component::Class(class.to_string())
    })
    .parse(input)
}

fn attr_selector(input: &str) -> IResult<&str, Component> {
    let (input, body) =
        delimited(char('['), take_while1(|c| c != ']'), char(']')).parse(input)?;
    let component = match body.split_once('=') {
        Some((name, value)) => {
            Component::AttrEq(name.trim().to_string(), unquote(value).to_string())
        }
        None => Component::Attr(body.trim().to_string()),
    };
    Ok((input, component))
}

fn pseudo_class(input: &str) -> IResult<&str, Component> {
    let (input, name) = preceded(char(':'), ident).parse(input)?;
    match name {
        "contains" => {
            let (input, text) =
                delimited(char('('), take_until(")"), char(')')).parse(input)?;
            Ok((input, Component::ContainsText(unquote(text).to_string())))
        }
        "nth-child" => {
            let (input, k) = child_index(input)?;
            Ok((input, Component::NthChild(k)))
        }
        "nth-last-child" => {
            let (input, k) = child_index(input)?;
            Ok((input, Component::NthLastChild(k)))
        }
        "first-child" => Ok((input, Component::FirstChild)),
        "last-child" => Ok((input, Component::LastChild)),
        "checked" | "disabled" | "required" | "autofocus" => {
            Ok((input, Component::Flag(name.to_string())))
        }
        "autocomplete" => Ok((input, Component::Autocomplete)),
        "scope" => Ok((input, Component::Scope)),
        _ if INPUT_KINDS.contains(&name) => Ok((input, Component::InputKind(name.to_string()))),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

/// One-based child index argument of `nth-child` and `nth-last-child`.
fn child_index(input: &str) -> IResult<&str, u32> {
    delimited(
        char('('),
        ws(verify(
            map_res(take_while1(|c: char| c.is_ascii_digit()), str::parse::<u32>),
            |k| *k >= 1,
        )),
        char(')'),
    )
    .parse(input)
}

/// Strips one matching pair of surrounding quotes, if present.
fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}
