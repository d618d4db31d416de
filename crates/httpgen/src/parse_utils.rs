//! Parsing utilities for directive attribute lists.
//!
//! Provides the lookahead-based helpers the directive tokenizer is built from:
//! comma-separated lists and `name [= literal]` items.

use httpgen_core::{AttrValue, DirectiveAttr};
use syn::{Ident, Lit, Token, parse::ParseStream};

/// Parse a comma-separated list with optional trailing comma.
///
/// Automatically handles the lookahead and comma parsing loop.
/// The provided parser function is called for each item.
///
/// # Example
/// ```ignore
/// let items: Vec<String> = parse_comma_list(input, |input| {
///     input.parse::<LitStr>().map(|lit| lit.value())
/// })?;
/// ```
pub fn parse_comma_list<T, F>(input: ParseStream, mut parser: F) -> syn::Result<Vec<T>>
where
    F: FnMut(ParseStream) -> syn::Result<T>,
{
    let mut items = Vec::new();

    while !input.is_empty() {
        items.push(parser(input)?);

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        } else if !input.is_empty() {
            return Err(input.error("expected `,`"));
        }
    }

    Ok(items)
}

/// Parse one `name` or `name = literal` item.
///
/// Returns the identifier alongside the attribute so callers can report
/// errors spanned to the name.
pub fn parse_attr(input: ParseStream) -> syn::Result<(Ident, DirectiveAttr)> {
    let name: Ident = input.parse()?;
    let value = if input.peek(Token![=]) {
        input.parse::<Token![=]>()?;
        Some(lit_to_value(input.parse()?)?)
    } else {
        None
    };
    let attr = DirectiveAttr {
        name: name.to_string(),
        value,
    };
    Ok((name, attr))
}

fn lit_to_value(lit: Lit) -> syn::Result<AttrValue> {
    match lit {
        Lit::Str(s) => Ok(AttrValue::Str(s.value())),
        Lit::Bool(b) => Ok(AttrValue::Bool(b.value)),
        Lit::Int(i) => Ok(AttrValue::Number(i.base10_digits().to_string())),
        Lit::Float(f) => Ok(AttrValue::Number(f.base10_digits().to_string())),
        other => Err(syn::Error::new_spanned(
            other,
            "unsupported literal; expected a string, bool or number",
        )),
    }
}
