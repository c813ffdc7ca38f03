//! A small CSS selector subset: optional tag name followed by `#id`,
//! `.class`, and `[attr]` / `[attr="value"]` qualifiers, no combinators.
//! That covers everything the page code queries for; anything else is a
//! typed parse error the query helpers downgrade to a warning.

use std::error::Error;
use std::fmt;

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrFilter {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    MissingName { at: usize },
    UnclosedAttribute,
    Unexpected { ch: char, at: usize },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "empty selector"),
            SelectorError::MissingName { at } => write!(f, "expected a name at position {at}"),
            SelectorError::UnclosedAttribute => write!(f, "unterminated attribute selector"),
            SelectorError::Unexpected { ch, at } => {
                write!(f, "unsupported character {ch:?} at position {at}")
            }
        }
    }
}

impl Error for SelectorError {}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }
        let chars: Vec<char> = trimmed.chars().collect();
        let mut selector = Selector::default();
        let mut i = 0;

        if chars[0] == '*' {
            i += 1;
        } else if is_ident_char(chars[0]) {
            selector.tag = Some(read_ident(&chars, &mut i).to_ascii_lowercase());
        }

        while i < chars.len() {
            match chars[i] {
                '#' => {
                    i += 1;
                    let name = read_ident(&chars, &mut i);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName { at: i });
                    }
                    selector.id = Some(name);
                }
                '.' => {
                    i += 1;
                    let name = read_ident(&chars, &mut i);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName { at: i });
                    }
                    selector.classes.push(name);
                }
                '[' => {
                    i += 1;
                    let filter = read_attr_filter(&chars, &mut i)?;
                    selector.attrs.push(filter);
                }
                ch => return Err(SelectorError::Unexpected { ch, at: i }),
            }
        }
        Ok(selector)
    }

    /// Whether `node` satisfies every qualifier of this selector.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if doc.tag(node) != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        if self.classes.iter().any(|class| !doc.has_class(node, class)) {
            return false;
        }
        for filter in &self.attrs {
            match doc.attr(node, &filter.name) {
                None => return false,
                Some(actual) => {
                    if let Some(expected) = &filter.value {
                        if actual != expected {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn read_attr_filter(chars: &[char], i: &mut usize) -> Result<AttrFilter, SelectorError> {
    let name = read_ident(chars, i);
    if name.is_empty() {
        return Err(SelectorError::MissingName { at: *i });
    }
    match chars.get(*i) {
        Some(']') => {
            *i += 1;
            Ok(AttrFilter { name, value: None })
        }
        Some('=') => {
            *i += 1;
            let value = read_attr_value(chars, i)?;
            Ok(AttrFilter {
                name,
                value: Some(value),
            })
        }
        Some(&ch) => Err(SelectorError::Unexpected { ch, at: *i }),
        None => Err(SelectorError::UnclosedAttribute),
    }
}

fn read_attr_value(chars: &[char], i: &mut usize) -> Result<String, SelectorError> {
    let quote = match chars.get(*i) {
        Some(&q @ ('"' | '\'')) => {
            *i += 1;
            Some(q)
        }
        _ => None,
    };
    let terminator = quote.unwrap_or(']');
    let start = *i;
    while *i < chars.len() && chars[*i] != terminator {
        *i += 1;
    }
    if *i >= chars.len() {
        return Err(SelectorError::UnclosedAttribute);
    }
    let value: String = chars[start..*i].iter().collect();
    *i += 1; // past the quote or bracket
    if quote.is_some() {
        match chars.get(*i) {
            Some(']') => *i += 1,
            Some(&ch) => return Err(SelectorError::Unexpected { ch, at: *i }),
            None => return Err(SelectorError::UnclosedAttribute),
        }
    }
    Ok(value)
}
