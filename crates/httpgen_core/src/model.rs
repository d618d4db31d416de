//! Interface model: what the generator knows about one interface after validation.

use serde::{Deserialize, Serialize};

use crate::route::RouteRule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub name: String,
    pub param: String,
    pub result: String,
    /// Documentation with directive lines removed.
    pub docs: Vec<String>,
    /// Never empty; order follows the directives.
    pub rules: Vec<RouteRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceModel {
    pub name: String,
    pub docs: Vec<String>,
    /// Declaration order.
    pub methods: Vec<MethodMetadata>,
}

impl InterfaceModel {
    /// `(method, rule index, rule)` for every route, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&MethodMetadata, usize, &RouteRule)> {
        self.methods.iter().flat_map(|method| {
            method
                .rules
                .iter()
                .enumerate()
                .map(move |(index, rule)| (method, index, rule))
        })
    }
}
