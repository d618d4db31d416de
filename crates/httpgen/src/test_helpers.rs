#![cfg(test)]
//! Shared test utilities for httpgen tests.
//!
//! - [`test_trait!`] parses a trait from a Rust source string
//! - [`decl_with`] builds a one-method [`InterfaceDecl`]
//! - [`create_test_temp_dir`] creates a scratch directory

use httpgen_core::{InterfaceDecl, MethodDecl};

/// Parse a trait from source code for testing
#[macro_export]
macro_rules! test_trait {
    ($code:expr) => {{
        let file: syn::File = syn::parse_str($code).expect("parse failed");
        file.items
            .into_iter()
            .find_map(|item| {
                if let syn::Item::Trait(t) = item {
                    Some(t)
                } else {
                    None
                }
            })
            .expect("no trait found")
    }};
}

/// Interface `name` with a single unary method documented by `docs`.
pub fn decl_with(name: &str, method: &str, docs: &[&str]) -> InterfaceDecl {
    InterfaceDecl {
        name: name.to_string(),
        docs: vec![],
        methods: vec![MethodDecl::unary(
            method,
            &format!("{method}Request"),
            &format!("{method}Response"),
            docs,
        )],
    }
}

/// Create temp directory for tests
pub fn create_test_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp dir")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_trait_macro() {
        let t = test_trait!("trait Foo { fn bar(&self); }");
        assert_eq!(t.ident, "Foo");
        assert_eq!(t.items.len(), 1);
    }

    #[test]
    fn test_decl_with() {
        let decl = decl_with("Dict", "GetDict", &[r#"#[http(get="/x")]"#]);
        assert_eq!(decl.methods[0].params, vec!["GetDictRequest".to_string()]);
        assert_eq!(decl.methods[0].docs.len(), 1);
    }
}
