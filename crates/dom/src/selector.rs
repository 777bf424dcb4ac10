//! A small CSS selector subset.
//!
//! Supported: type selectors and `*`, `#id`, `.class`, `[attr]`,
//! `[attr=value]`, and the descendant (whitespace) and child (`>`)
//! combinators. Ancestors named by a selector may sit outside the scope a
//! query runs from; only the matched node itself must be inside it.

use crate::document::{Document, NodeId};
use crate::error::SelectorError;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{map, opt};
use nom::error::{Error as NomError, ErrorKind};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

/// A run of simple selectors with no combinator between them (`div.a#b`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub simples: Vec<SimpleSelector>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(name) = doc.tag_name(node) else {
            return false;
        };
        if let Some(tag) = &self.tag
            && !tag.eq_ignore_ascii_case(name)
        {
            return false;
        }
        self.simples.iter().all(|simple| match simple {
            SimpleSelector::Id(id) => doc.attr(node, "id") == Some(id.as_str()),
            SimpleSelector::Class(class) => doc.has_class(node, class),
            SimpleSelector::Attribute { name, value: None } => doc.attr(node, name).is_some(),
            SimpleSelector::Attribute {
                name,
                value: Some(expected),
            } => doc.attr(node, name) == Some(expected.as_str()),
        })
    }
}

/// A parsed selector: compounds joined by combinators, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }
        match pair(compound, many0(pair(combinator, compound)))(trimmed) {
            Ok(("", (first, rest))) => {
                let mut compounds = vec![first];
                let mut combinators = Vec::with_capacity(rest.len());
                for (comb, next) in rest {
                    combinators.push(comb);
                    compounds.push(next);
                }
                Ok(Self {
                    compounds,
                    combinators,
                })
            }
            Ok((rest, _)) => Err(SelectorError::Invalid {
                selector: source.to_string(),
                rest: rest.to_string(),
            }),
            Err(_) => Err(SelectorError::Invalid {
                selector: source.to_string(),
                rest: trimmed.to_string(),
            }),
        }
    }

    /// Whether `node` is matched by the full selector.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let last = self.compounds.len() - 1;
        self.compounds[last].matches(doc, node) && self.matches_ancestors(doc, node, last)
    }

    fn matches_ancestors(&self, doc: &Document, node: NodeId, index: usize) -> bool {
        if index == 0 {
            return true;
        }
        let previous = &self.compounds[index - 1];
        match self.combinators[index - 1] {
            Combinator::Child => doc.parent(node).is_some_and(|parent| {
                previous.matches(doc, parent) && self.matches_ancestors(doc, parent, index - 1)
            }),
            Combinator::Descendant => {
                let mut current = doc.parent(node);
                while let Some(ancestor) = current {
                    if previous.matches(doc, ancestor) && self.matches_ancestors(doc, ancestor, index - 1) {
                        return true;
                    }
                    current = doc.parent(ancestor);
                }
                false
            }
        }
    }
}

// --- Parsers ---

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char)(input)
}

fn attribute_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| is_ident_char(c) || c == ':')(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
    ))(input)
}

fn attribute(input: &str) -> IResult<&str, SimpleSelector> {
    map(
        delimited(
            char('['),
            tuple((
                delimited(multispace0, attribute_name, multispace0),
                opt(preceded(
                    pair(char('='), multispace0),
                    terminated(alt((quoted, ident)), multispace0),
                )),
            )),
            char(']'),
        ),
        |(name, value): (&str, Option<&str>)| SimpleSelector::Attribute {
            name: name.to_string(),
            value: value.map(str::to_string),
        },
    )(input)
}

fn simple(input: &str) -> IResult<&str, SimpleSelector> {
    alt((
        map(preceded(char('#'), ident), |id: &str| SimpleSelector::Id(id.to_string())),
        map(preceded(char('.'), ident), |class: &str| {
            SimpleSelector::Class(class.to_string())
        }),
        attribute,
    ))(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    let (input, tag_name) = opt(alt((tag("*"), ident)))(input)?;
    let (input, simples) = many0(simple)(input)?;
    if tag_name.is_none() && simples.is_empty() {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::Verify)));
    }
    Ok((
        input,
        Compound {
            tag: tag_name.filter(|t| *t != "*").map(str::to_string),
            simples,
        },
    ))
}

fn combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        map(delimited(multispace0, char('>'), multispace0), |_| Combinator::Child),
        map(multispace1, |_| Combinator::Descendant),
    ))(input)
}
