//! Unified error handling for httpgen.
//!
//! Every failure of the directive pipeline is a [`GenError`]: one of the
//! [`GenErrorKind`]s plus the interface, method and directive text it came from.
//! Errors are static properties of the input, so nothing here is retried.
//!
//! # Key Functions
//!
//! - [`err_call_site`] - Create a `syn` error while tokenizing a directive
//! - [`GenError::new`] - Attach interface/method context to a kind

use proc_macro2::Span;

/// Result type of the `syn`-driven directive tokenizer.
pub type ParseResult<T> = Result<T, syn::Error>;

/// Create an error at the call site.
#[inline]
pub fn err_call_site<M: std::fmt::Display>(message: M) -> syn::Error {
    syn::Error::new(Span::call_site(), message)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenErrorKind {
    #[error("malformed directive: {0}")]
    Syntax(String),
    #[error("missing route: {0}")]
    MissingRoute(String),
    #[error("{verb} {path}: body should not be declared")]
    InvalidBody { verb: String, path: String },
    #[error("{verb} {path}: does not declare a body")]
    MissingBody { verb: String, path: String },
    #[error("method must take exactly one parameter and return exactly one result (found {params} and {results})")]
    Shape { params: usize, results: usize },
    #[error("method has no http directive")]
    NoRoute,
    #[error("{verb} {path}: route declared more than once")]
    DuplicateRoute { verb: String, path: String },
    #[error("generated name `{generated}` is already taken by method `{other}`")]
    NameCollision { other: String, generated: String },
}

/// A [`GenErrorKind`] that still lacks the interface/method it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct DirectiveError {
    pub directive: String,
    pub kind: GenErrorKind,
}

impl DirectiveError {
    pub fn new(directive: &str, kind: GenErrorKind) -> Self {
        Self {
            directive: directive.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("interface `{interface}` method `{method}`: {kind}{}", directive_suffix(.directive))]
pub struct GenError {
    pub interface: String,
    pub method: String,
    /// Offending directive text; empty when the failure is not tied to one.
    pub directive: String,
    pub kind: GenErrorKind,
}

impl GenError {
    pub fn new(interface: &str, method: &str, directive: &str, kind: GenErrorKind) -> Self {
        Self {
            interface: interface.to_string(),
            method: method.to_string(),
            directive: directive.to_string(),
            kind,
        }
    }

    pub fn from_directive(interface: &str, method: &str, err: DirectiveError) -> Self {
        Self::new(interface, method, &err.directive, err.kind)
    }
}

fn directive_suffix(directive: &str) -> String {
    if directive.is_empty() {
        String::new()
    } else {
        format!(" (in `{directive}`)")
    }
}
