//! Path templates and their rewrite to a router's variable syntax.

use serde::{Deserialize, Serialize};

/// How the target router spells a single path variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// `/items/:id`
    #[default]
    Colon,
    /// `/items/{id}`
    Brace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PathSegment {
    Literal(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path variable in segment `{0}` has no name")]
    EmptyVariable(String),
    #[error("unbalanced braces in path segment `{0}`")]
    UnbalancedBraces(String),
}

/// A `/`-separated route path. Both `{name}` and `:name` segments are variables,
/// so rendering an already rewritten path is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let segments = path
            .split('/')
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Variable names in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Variable(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    pub fn has_variables(&self) -> bool {
        self.variables().next().is_some()
    }

    pub fn render(&self, style: PathStyle) -> String {
        self.segments
            .iter()
            .map(|segment| match (segment, style) {
                (PathSegment::Literal(text), _) => text.clone(),
                (PathSegment::Variable(name), PathStyle::Colon) => format!(":{name}"),
                (PathSegment::Variable(name), PathStyle::Brace) => format!("{{{name}}}"),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn parse_segment(segment: &str) -> Result<PathSegment, PathError> {
    if let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        if inner.is_empty() {
            return Err(PathError::EmptyVariable(segment.to_string()));
        }
        if inner.contains(['{', '}']) {
            return Err(PathError::UnbalancedBraces(segment.to_string()));
        }
        return Ok(PathSegment::Variable(inner.to_string()));
    }
    if segment.contains(['{', '}']) {
        return Err(PathError::UnbalancedBraces(segment.to_string()));
    }
    if let Some(name) = segment.strip_prefix(':') {
        if name.is_empty() {
            return Err(PathError::EmptyVariable(segment.to_string()));
        }
        return Ok(PathSegment::Variable(name.to_string()));
    }
    Ok(PathSegment::Literal(segment.to_string()))
}
