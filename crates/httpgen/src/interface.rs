//! Interface model builder.
//!
//! Walks an [`InterfaceDecl`] method by method, feeding every documentation
//! line through the directive parser and the resulting directives through the
//! rule builder. Declaration order is kept end to end: it decides the order
//! routes are registered in.

use heck::ToSnakeCase;
use httpgen_core::{GeneratorConfig, InterfaceDecl, InterfaceModel, MethodDecl, MethodMetadata};
use tracing::debug;

use crate::directive::{parse_directive, split_docs};
use crate::error::{GenError, GenErrorKind};
use crate::rule::build_rules;

/// Visitor over the methods of one interface declaration.
pub struct InterfaceBuilder<'a> {
    interface: &'a str,
    config: &'a GeneratorConfig,
    methods: Vec<MethodMetadata>,
}

impl<'a> InterfaceBuilder<'a> {
    pub fn new(interface: &'a str, config: &'a GeneratorConfig) -> Self {
        Self {
            interface,
            config,
            methods: Vec::new(),
        }
    }

    pub fn visit_method(&mut self, method: &MethodDecl) -> Result<(), GenError> {
        let error = |directive: &str, kind| GenError::new(self.interface, &method.name, directive, kind);

        let ([param], [result]) = (method.params.as_slice(), method.results.as_slice()) else {
            return Err(error(
                "",
                GenErrorKind::Shape {
                    params: method.params.len(),
                    results: method.results.len(),
                },
            ));
        };
        // Generated identifiers are snake case, so `GetDict` and `getDict` collide.
        let generated = method.name.to_snake_case();
        if let Some(other) = self
            .methods
            .iter()
            .find(|seen| seen.name.to_snake_case() == generated)
        {
            return Err(error(
                "",
                GenErrorKind::NameCollision {
                    other: other.name.clone(),
                    generated,
                },
            ));
        }
        let (directives, docs) =
            split_docs(&method.docs).map_err(|(line, kind)| error(&line, kind))?;
        let rules = build_rules(&directives, self.config)
            .map_err(|err| GenError::from_directive(self.interface, &method.name, err))?;
        if rules.is_empty() {
            return Err(error("", GenErrorKind::NoRoute));
        }
        // A verb + path may be registered by one method only.
        for (rule, directive) in rules.iter().zip(&directives) {
            let taken = self
                .methods
                .iter()
                .flat_map(|seen| &seen.rules)
                .any(|seen| seen.verb() == rule.verb() && seen.path() == rule.path());
            if taken {
                return Err(error(
                    &directive.text,
                    GenErrorKind::DuplicateRoute {
                        verb: rule.verb().to_string(),
                        path: rule.path().to_string(),
                    },
                ));
            }
        }
        debug!(
            interface = self.interface,
            method = %method.name,
            routes = rules.len(),
            "collected method"
        );

        self.methods.push(MethodMetadata {
            name: method.name.clone(),
            param: param.clone(),
            result: result.clone(),
            docs,
            rules,
        });
        Ok(())
    }

    pub fn finish(self, docs: Vec<String>) -> InterfaceModel {
        InterfaceModel {
            name: self.interface.to_string(),
            docs,
            methods: self.methods,
        }
    }
}

/// Build the model of one interface. The first failing method aborts the interface.
pub fn build_interface(
    decl: &InterfaceDecl,
    config: &GeneratorConfig,
) -> Result<InterfaceModel, GenError> {
    let mut builder = InterfaceBuilder::new(&decl.name, config);
    for method in &decl.methods {
        builder.visit_method(method)?;
    }
    // Interface-level directives have no meaning; keep only prose.
    let docs = decl
        .docs
        .iter()
        .filter(|line| !matches!(parse_directive(line), Ok(Some(_))))
        .cloned()
        .collect();
    Ok(builder.finish(docs))
}
