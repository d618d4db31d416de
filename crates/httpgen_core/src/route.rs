//! Route rules: the validated form of one `#[http(...)]` directive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::PathTemplate;

/// Standard HTTP verbs a directive may name directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Canonical uppercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Look a verb up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verb of a route rule. Custom verbs keep the spelling they were declared with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Verb {
    Standard(HttpMethod),
    Custom(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard(method) => method.as_str(),
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// `true` only for the standard verb `method`; custom verbs never match.
    pub fn is(&self, method: HttpMethod) -> bool {
        matches!(self, Self::Standard(m) if *m == method)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dotted path into a request or response object, one snake_case segment per level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Build from already-normalized segments. Returns `None` for an empty list.
    pub fn new(segments: Vec<String>) -> Option<Self> {
        (!segments.is_empty()).then_some(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Which part of a request/response object a body maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum BodySelector {
    #[default]
    None,
    Whole,
    Field(FieldPath),
}

impl BodySelector {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn field(&self) -> Option<&FieldPath> {
        match self {
            Self::Field(path) => Some(path),
            _ => None,
        }
    }
}

/// A validated, normalized HTTP endpoint derived from one directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    verb: Verb,
    template: PathTemplate,
    path: String,
    body: BodySelector,
    response_body: BodySelector,
    has_path_variables: bool,
    has_body: bool,
    is_custom: bool,
}

impl RouteRule {
    /// `path` is the template already rewritten to the router's variable syntax.
    pub fn new(
        verb: Verb,
        template: PathTemplate,
        path: String,
        body: BodySelector,
        response_body: BodySelector,
    ) -> Self {
        Self {
            has_path_variables: template.has_variables(),
            has_body: !body.is_none(),
            is_custom: verb.is_custom(),
            verb,
            template,
            path,
            body,
            response_body,
        }
    }

    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Router-facing path, e.g. `/v1/items/:id`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &BodySelector {
        &self.body
    }

    pub fn response_body(&self) -> &BodySelector {
        &self.response_body
    }

    pub fn has_path_variables(&self) -> bool {
        self.has_path_variables
    }

    pub fn has_body(&self) -> bool {
        self.has_body
    }

    pub fn is_custom(&self) -> bool {
        self.is_custom
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::path::PathStyle;

    #[rstest]
    #[case("get", Some(HttpMethod::Get))]
    #[case("POST", Some(HttpMethod::Post))]
    #[case("Patch", Some(HttpMethod::Patch))]
    #[case("dElEtE", Some(HttpMethod::Delete))]
    #[case("link", None)]
    #[case("", None)]
    fn test_http_method_from_name(#[case] name: &str, #[case] expected: Option<HttpMethod>) {
        assert_eq!(HttpMethod::from_name(name), expected);
    }

    #[test]
    fn test_verb_is_ignores_custom_spelling() {
        assert!(Verb::Standard(HttpMethod::Patch).is(HttpMethod::Patch));
        assert!(!Verb::Custom("PATCH".into()).is(HttpMethod::Patch));
        assert_eq!(Verb::Custom("LINK".into()).to_string(), "LINK");
    }

    #[test]
    fn test_route_rule_derives_flags() {
        let template = PathTemplate::parse("/v1/items/{id}").unwrap();
        let path = template.render(PathStyle::Colon);
        let rule = RouteRule::new(
            Verb::Standard(HttpMethod::Put),
            template,
            path,
            BodySelector::Whole,
            BodySelector::None,
        );
        assert!(rule.has_body());
        assert!(rule.has_path_variables());
        assert!(!rule.is_custom());
        assert_eq!(rule.path(), "/v1/items/:id");
    }

    #[test]
    fn test_body_selector_serializes_tagged() {
        let selector = BodySelector::Field(FieldPath::new(vec!["item".into(), "name".into()]).unwrap());
        let json = serde_json::to_value(&selector).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "field", "path": ["item", "name"]}));
        assert_eq!(
            serde_json::to_value(BodySelector::Whole).unwrap(),
            serde_json::json!({"kind": "whole"})
        );
    }
}
