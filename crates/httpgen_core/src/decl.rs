//! Interface declarations as handed over by a discovery front end.

use serde::{Deserialize, Serialize};

/// One method of an interface contract, in source form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// Parameter types, receiver excluded.
    pub params: Vec<String>,
    /// Result types; an empty list means the method returns nothing.
    pub results: Vec<String>,
    /// Documentation lines, directives included.
    pub docs: Vec<String>,
}

/// An interface contract: a named, ordered set of methods.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub docs: Vec<String>,
    pub methods: Vec<MethodDecl>,
}

impl MethodDecl {
    /// Single-request, single-response method with the given doc lines.
    pub fn unary(name: &str, param: &str, result: &str, docs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            params: vec![param.to_string()],
            results: vec![result.to_string()],
            docs: docs.iter().map(|line| (*line).to_string()).collect(),
        }
    }
}
