//! Names understood inside an `#[http(...)]` directive.
//!
//! # Overview
//!
//! A directive names its route either with a verb attribute carrying the path
//! (`get = "/v1/items/{id}"`) or with the generic `route` attribute carrying a
//! custom verb next to a `path` attribute. `body` and `response_body` select
//! the part of the request/response object mapped to the HTTP body.
//!
//! # Key Functions
//!
//! - [`is_route_verb`] - Validate if a string is a verb attribute
//! - [`is_known_attribute`] - Validate if a string is any recognized attribute

/// Namespace of the directives this generator consumes.
pub const NAMESPACE: &str = "http";

pub const ATTR_ROUTE: &str = "route";
pub const ATTR_PATH: &str = "path";
pub const ATTR_BODY: &str = "body";
pub const ATTR_RESPONSE_BODY: &str = "response_body";

/// Verb attributes as lowercase strings.
pub const ROUTE_VERBS: &[&str] = &["get", "put", "post", "delete", "patch"];

/// Check if a string is a verb attribute (case-insensitive).
pub fn is_route_verb(s: &str) -> bool {
    ROUTE_VERBS.contains(&s.to_lowercase().as_str())
}

/// Verbs and `route` both name the route of a directive.
pub fn is_routing_attribute(s: &str) -> bool {
    s == ATTR_ROUTE || is_route_verb(s)
}

pub fn is_known_attribute(s: &str) -> bool {
    is_routing_attribute(s) || [ATTR_PATH, ATTR_BODY, ATTR_RESPONSE_BODY].contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_route_verb_valid() {
        for verb in ROUTE_VERBS {
            assert!(is_route_verb(verb));
            assert!(is_route_verb(&verb.to_uppercase()));
        }
    }

    #[test]
    fn test_is_route_verb_invalid() {
        assert!(!is_route_verb("head"));
        assert!(!is_route_verb("route"));
        assert!(!is_route_verb(""));
    }

    #[test]
    fn test_routing_attributes() {
        assert!(is_routing_attribute("route"));
        assert!(is_routing_attribute("patch"));
        assert!(!is_routing_attribute("body"));
    }

    #[test]
    fn test_known_attributes() {
        for name in ["get", "route", "path", "body", "response_body"] {
            assert!(is_known_attribute(name), "{name} should be recognized");
        }
        assert!(!is_known_attribute("query"));
        assert!(!is_known_attribute("responseBody"));
    }
}
