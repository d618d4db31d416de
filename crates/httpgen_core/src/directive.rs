//! Parsed `#[namespace(attr = value, ...)]` directives.

use serde::{Deserialize, Serialize};

/// Literal value of a directive attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    /// Integer or float, kept as written.
    Number(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveAttr {
    pub name: String,
    /// `None` for a bare attribute such as `get`.
    pub value: Option<AttrValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Namespace, e.g. `http`.
    pub identity: String,
    pub attrs: Vec<DirectiveAttr>,
    /// Source text the directive was parsed from, comment marker stripped.
    pub text: String,
}

impl Directive {
    pub fn attr(&self, name: &str) -> Option<&DirectiveAttr> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    /// String value of `name`, if the attribute is present with a string literal.
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.attr(name)
            .and_then(|attr| attr.value.as_ref())
            .and_then(AttrValue::as_str)
    }
}
