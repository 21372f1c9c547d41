//! Selector matching
//!
//! Compound simple selectors (`tag`, `#id`, `.class`, `*`), the
//! descendant combinator, and comma-separated lists. Anything richer is
//! out of scope; parse failures are explicit errors.

use strand_core::Error;

use crate::node::ElementData;
use crate::tree::DomTree;
use crate::NodeId;

/// One simple selector part
#[derive(Debug, Clone, PartialEq, Eq)]
enum SimplePart {
    Tag(String),
    Id(String),
    Class(String),
    Universal,
}

/// Conjunction of simple parts, e.g. `div.item#main`
#[derive(Debug, Clone)]
struct Compound {
    parts: Vec<SimplePart>,
}

impl Compound {
    fn parse(input: &str) -> Result<Self, Error> {
        let mut parts = Vec::new();
        let mut rest = input;

        if rest == "*" {
            return Ok(Self {
                parts: vec![SimplePart::Universal],
            });
        }

        if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let end = rest
                .find(['#', '.'])
                .unwrap_or(rest.len());
            let (tag, tail) = rest.split_at(end);
            if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(Error::message(format!("unsupported selector: {input}")));
            }
            parts.push(SimplePart::Tag(tag.to_ascii_lowercase()));
            rest = tail;
        }

        while !rest.is_empty() {
            let kind = match rest.chars().next() {
                Some(c @ ('#' | '.')) => c,
                _ => return Err(Error::message(format!("unsupported selector: {input}"))),
            };
            let tail = &rest[1..];
            let end = tail.find(['#', '.']).unwrap_or(tail.len());
            let (name, remainder) = tail.split_at(end);
            if name.is_empty() || !name.chars().all(is_name_char) {
                return Err(Error::message(format!("unsupported selector: {input}")));
            }
            if kind == '#' {
                parts.push(SimplePart::Id(name.to_string()));
            } else {
                parts.push(SimplePart::Class(name.to_string()));
            }
            rest = remainder;
        }

        if parts.is_empty() {
            return Err(Error::message(format!("unsupported selector: {input}")));
        }
        Ok(Self { parts })
    }

    fn matches(&self, element: &ElementData) -> bool {
        self.parts.iter().all(|part| match part {
            SimplePart::Universal => true,
            SimplePart::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            SimplePart::Id(id) => element.id.as_deref() == Some(id),
            SimplePart::Class(class) => element.has_class(class),
        })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Parsed selector: comma-separated alternatives, each a descendant chain
/// of compounds (`ul li.item, #nav a`).
#[derive(Debug, Clone)]
pub struct Selector {
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, Error> {
        if input.trim().is_empty() {
            return Err(Error::type_mismatch("selector", "empty string"));
        }

        let mut alternatives = Vec::new();
        for alternative in input.split(',') {
            let chain: Vec<Compound> = alternative
                .split_whitespace()
                .map(Compound::parse)
                .collect::<Result<_, _>>()?;
            if chain.is_empty() {
                return Err(Error::message(format!("unsupported selector: {input}")));
            }
            alternatives.push(chain);
        }
        Ok(Self { alternatives })
    }

    /// Check whether the element with id `id` matches this selector.
    ///
    /// For a descendant chain the rightmost compound must match the
    /// element itself and each earlier compound some strictly higher
    /// ancestor, in order.
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(element) = tree.get(id).and_then(|node| node.as_element()) else {
            return false;
        };

        self.alternatives.iter().any(|chain| {
            let (last, outer) = chain.split_last().expect("chains are non-empty");
            if !last.matches(element) {
                return false;
            }

            let mut remaining = outer.iter().rev();
            let mut wanted = match remaining.next() {
                Some(compound) => compound,
                None => return true,
            };
            for ancestor in tree.ancestors(id) {
                let Some(candidate) = tree.get(ancestor).and_then(|node| node.as_element()) else {
                    continue;
                };
                if wanted.matches(candidate) {
                    wanted = match remaining.next() {
                        Some(compound) => compound,
                        None => return true,
                    };
                }
            }
            false
        })
    }
}

impl std::str::FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
