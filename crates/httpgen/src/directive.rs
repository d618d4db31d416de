//! Directive parser.
//!
//! Turns one documentation line into a [`Directive`]. Lines whose namespace is
//! not [`NAMESPACE`] are not an error: they are ordinary documentation and the
//! parser reports "no match" for them.
//!
//! # Grammar
//!
//! ```text
//! #[<namespace>(<attr>[=<value>][, <attr>[=<value>]]*)]
//! ```
//!
//! The attribute list is tokenized with `syn`, so string escapes, numbers and
//! booleans follow Rust literal syntax.

use httpgen_core::{AttrValue, Directive, DirectiveAttr};
use syn::{Attribute, Meta, parse::Parser};

use crate::error::{GenErrorKind, ParseResult, err_call_site};
use crate::http::{NAMESPACE, is_known_attribute};
use crate::parse_utils::{parse_attr, parse_comma_list};

/// Strip surrounding whitespace and a leading `//` / `///` comment marker.
pub fn strip_comment_marker(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix("///")
        .or_else(|| line.strip_prefix("//"))
        .map_or(line, str::trim)
}

/// Namespace token of a `#[name(...)]` line, read lexically so that a
/// malformed directive can still be recognized as ours.
fn namespace_of(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("#[")?.trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Parse one documentation line.
///
/// Returns `Ok(None)` when the line is not an `http` directive.
pub fn parse_directive(line: &str) -> Result<Option<Directive>, GenErrorKind> {
    let text = strip_comment_marker(line);
    if namespace_of(text) != Some(NAMESPACE) {
        return Ok(None);
    }
    let attrs = parse_attribute_list(text).map_err(|err| GenErrorKind::Syntax(err.to_string()))?;
    Ok(Some(Directive {
        identity: NAMESPACE.to_string(),
        attrs,
        text: text.to_string(),
    }))
}

fn parse_attribute_list(text: &str) -> ParseResult<Vec<DirectiveAttr>> {
    let attributes = Attribute::parse_outer.parse_str(text)?;
    let [attribute] = attributes.as_slice() else {
        return Err(err_call_site("expected exactly one `#[http(...)]` per line"));
    };
    let Meta::List(list) = &attribute.meta else {
        return Err(syn::Error::new_spanned(
            &attribute.meta,
            "expected an attribute list, e.g. `#[http(get = \"/path\")]`",
        ));
    };
    let items = list.parse_args_with(|input: syn::parse::ParseStream| parse_comma_list(input, parse_attr))?;

    let mut attrs: Vec<DirectiveAttr> = Vec::with_capacity(items.len());
    for (ident, attr) in items {
        if !is_known_attribute(&attr.name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("unknown attribute `{}` in #[http(...)]", attr.name),
            ));
        }
        if attrs.iter().any(|seen| seen.name == attr.name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("attribute `{}` given more than once", attr.name),
            ));
        }
        if let Some(value) = &attr.value
            && !matches!(value, AttrValue::Str(_))
        {
            return Err(syn::Error::new_spanned(
                ident,
                format!("attribute `{}` expects a string literal", attr.name),
            ));
        }
        attrs.push(attr);
    }
    Ok(attrs)
}

/// Parse every line, keeping directives and the remaining documentation apart.
///
/// On failure the offending line is returned with the error.
pub fn split_docs(lines: &[String]) -> Result<(Vec<Directive>, Vec<String>), (String, GenErrorKind)> {
    let mut directives = Vec::new();
    let mut docs = Vec::new();
    for line in lines {
        match parse_directive(line) {
            Ok(Some(directive)) => directives.push(directive),
            Ok(None) => docs.push(line.clone()),
            Err(kind) => return Err((strip_comment_marker(line).to_string(), kind)),
        }
    }
    Ok((directives, docs))
}
