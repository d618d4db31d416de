//! Rule builder.
//!
//! Turns the directives attached to one method into validated [`RouteRule`]s.
//!
//! # Body policy
//!
//! Whether a route may or must carry a body depends on its verb. Each verb maps
//! to one [`BodyPolicy`] in [`BODY_POLICIES`]; custom verbs use
//! [`advisory_body`], which accepts whatever was declared.
//!
//! | verb   | `body` present                     | `body` absent                          |
//! |--------|------------------------------------|----------------------------------------|
//! | GET    | InvalidBody                        | no body                                |
//! | DELETE | allowed with `allow_delete_body`   | no body                                |
//! | PATCH  | body                               | allowed with `allow_empty_patch_body`  |
//! | POST   | body                               | MissingBody                            |
//! | PUT    | body                               | MissingBody                            |

use httpgen_core::{
    BodySelector, Directive, FieldPath, GeneratorConfig, HttpMethod, PathTemplate, RouteRule, Verb,
};
use heck::ToSnakeCase;
use tracing::debug;

use crate::error::{DirectiveError, GenErrorKind};
use crate::http::{ATTR_BODY, ATTR_PATH, ATTR_RESPONSE_BODY, ATTR_ROUTE, is_routing_attribute};

/// Route attributes of one directive, before any verb-specific check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAttrs<'a> {
    pub verb: Verb,
    pub path: &'a str,
    /// Raw `body` value; `Some("")` is an explicit empty body.
    pub body: Option<&'a str>,
    pub response_body: Option<&'a str>,
}

/// Decide the request-body selector of a route.
pub type BodyPolicy = fn(&RouteAttrs<'_>, &GeneratorConfig) -> Result<BodySelector, GenErrorKind>;

pub const BODY_POLICIES: &[(HttpMethod, BodyPolicy)] = &[
    (HttpMethod::Get, forbid_body),
    (HttpMethod::Delete, delete_body),
    (HttpMethod::Patch, patch_body),
    (HttpMethod::Post, require_body),
    (HttpMethod::Put, require_body),
];

/// Policy applied to `verb`.
pub fn body_policy(verb: &Verb) -> BodyPolicy {
    match verb {
        Verb::Custom(_) => advisory_body,
        Verb::Standard(method) => BODY_POLICIES
            .iter()
            .find(|(m, _)| m == method)
            .map_or(advisory_body, |(_, policy)| *policy),
    }
}

fn invalid_body(attrs: &RouteAttrs<'_>) -> GenErrorKind {
    GenErrorKind::InvalidBody {
        verb: attrs.verb.to_string(),
        path: attrs.path.to_string(),
    }
}

fn missing_body(attrs: &RouteAttrs<'_>) -> GenErrorKind {
    GenErrorKind::MissingBody {
        verb: attrs.verb.to_string(),
        path: attrs.path.to_string(),
    }
}

pub fn forbid_body(attrs: &RouteAttrs<'_>, _: &GeneratorConfig) -> Result<BodySelector, GenErrorKind> {
    match attrs.body {
        Some(_) => Err(invalid_body(attrs)),
        None => Ok(BodySelector::None),
    }
}

pub fn delete_body(attrs: &RouteAttrs<'_>, config: &GeneratorConfig) -> Result<BodySelector, GenErrorKind> {
    match attrs.body {
        Some(_) if !config.allow_delete_body => Err(invalid_body(attrs)),
        Some(body) => normalize_selector(body),
        None => Ok(BodySelector::None),
    }
}

pub fn patch_body(attrs: &RouteAttrs<'_>, config: &GeneratorConfig) -> Result<BodySelector, GenErrorKind> {
    match attrs.body {
        Some(body) => normalize_selector(body),
        None if config.allow_empty_patch_body => Ok(BodySelector::None),
        None => Err(missing_body(attrs)),
    }
}

pub fn require_body(attrs: &RouteAttrs<'_>, _: &GeneratorConfig) -> Result<BodySelector, GenErrorKind> {
    match attrs.body {
        Some(body) => normalize_selector(body),
        None => Err(missing_body(attrs)),
    }
}

pub fn advisory_body(attrs: &RouteAttrs<'_>, _: &GeneratorConfig) -> Result<BodySelector, GenErrorKind> {
    attrs.body.map_or(Ok(BodySelector::None), normalize_selector)
}

/// `"*"` and `""` select the whole object, anything else a dotted field path.
///
/// Segments are snake-cased with their leading underscores kept; keywords are
/// rejected since they cannot name a field.
pub fn normalize_selector(value: &str) -> Result<BodySelector, GenErrorKind> {
    if value.is_empty() || value == "*" {
        return Ok(BodySelector::Whole);
    }
    let invalid = || GenErrorKind::Syntax(format!("invalid field selector `{value}`"));
    let segments = value
        .split('.')
        .map(|segment| {
            let name = snake_segment(segment);
            if is_field_name(&name) { Ok(name) } else { Err(invalid()) }
        })
        .collect::<Result<Vec<_>, _>>()?;
    FieldPath::new(segments).map(BodySelector::Field).ok_or_else(invalid)
}

fn snake_segment(segment: &str) -> String {
    let rest = segment.trim_start_matches('_');
    let underscores = &segment[..segment.len() - rest.len()];
    format!("{underscores}{}", rest.to_snake_case())
}

fn is_field_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Extract the single routing attribute of a directive.
fn route_attrs(directive: &Directive) -> Result<RouteAttrs<'_>, GenErrorKind> {
    let mut routing = directive
        .attrs
        .iter()
        .filter(|attr| is_routing_attribute(&attr.name));
    let Some(route) = routing.next() else {
        return Err(GenErrorKind::MissingRoute(
            "directive names no verb or `route`".to_string(),
        ));
    };
    if let Some(extra) = routing.next() {
        return Err(GenErrorKind::MissingRoute(format!(
            "directive names more than one route (`{}` and `{}`)",
            route.name, extra.name
        )));
    }

    let (verb, path) = if route.name == ATTR_ROUTE {
        let verb = directive
            .str_value(ATTR_ROUTE)
            .filter(|verb| !verb.is_empty())
            .ok_or_else(|| GenErrorKind::MissingRoute("`route` has no verb".to_string()))?;
        let path = directive
            .str_value(ATTR_PATH)
            .ok_or_else(|| GenErrorKind::MissingRoute(format!("`route = \"{verb}\"` has no `path`")))?;
        (Verb::Custom(verb.to_string()), path)
    } else {
        if directive.attr(ATTR_PATH).is_some() {
            return Err(GenErrorKind::Syntax(format!(
                "`path` is only valid with `route`, not with `{}`",
                route.name
            )));
        }
        let method = HttpMethod::from_name(&route.name)
            .ok_or_else(|| GenErrorKind::MissingRoute(format!("unknown verb `{}`", route.name)))?;
        let path = directive
            .str_value(&route.name)
            .ok_or_else(|| GenErrorKind::MissingRoute(format!("`{}` has no path", route.name)))?;
        (Verb::Standard(method), path)
    };
    if path.is_empty() {
        return Err(GenErrorKind::MissingRoute(format!("{verb} has an empty path")));
    }

    Ok(RouteAttrs {
        verb,
        path,
        body: directive.str_value(ATTR_BODY),
        response_body: directive.str_value(ATTR_RESPONSE_BODY),
    })
}

/// Build and validate the rule of one directive.
pub fn build_rule(directive: &Directive, config: &GeneratorConfig) -> Result<RouteRule, GenErrorKind> {
    let attrs = route_attrs(directive)?;
    let body = body_policy(&attrs.verb)(&attrs, config)?;
    let response_body = attrs
        .response_body
        .map_or(Ok(BodySelector::None), normalize_selector)?;
    let template =
        PathTemplate::parse(attrs.path).map_err(|err| GenErrorKind::Syntax(err.to_string()))?;
    let path = template.render(config.path_style);
    Ok(RouteRule::new(attrs.verb, template, path, body, response_body))
}

/// Build the rules of one method, in directive order.
pub fn build_rules(
    directives: &[Directive],
    config: &GeneratorConfig,
) -> Result<Vec<RouteRule>, DirectiveError> {
    let mut rules: Vec<RouteRule> = Vec::with_capacity(directives.len());
    for directive in directives {
        let rule =
            build_rule(directive, config).map_err(|kind| DirectiveError::new(&directive.text, kind))?;
        if rules
            .iter()
            .any(|seen| seen.verb() == rule.verb() && seen.path() == rule.path())
        {
            return Err(DirectiveError::new(
                &directive.text,
                GenErrorKind::DuplicateRoute {
                    verb: rule.verb().to_string(),
                    path: rule.path().to_string(),
                },
            ));
        }
        debug!(verb = %rule.verb(), path = rule.path(), has_body = rule.has_body(), "built route rule");
        rules.push(rule);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use httpgen_core::PathStyle;
    use rstest::rstest;

    use super::*;
    use crate::directive::parse_directive;

    fn directive(line: &str) -> Directive {
        parse_directive(line).unwrap().unwrap()
    }

    fn build(line: &str, config: &GeneratorConfig) -> Result<RouteRule, GenErrorKind> {
        build_rule(&directive(line), config)
    }

    fn field(path: &[&str]) -> BodySelector {
        BodySelector::Field(FieldPath::new(path.iter().map(|s| (*s).to_string()).collect()).unwrap())
    }

    #[test]
    fn test_get_with_body_is_invalid() {
        let err = build(r#"#[http(get="/x", body="*")]"#, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GenErrorKind::InvalidBody {
                verb: "GET".into(),
                path: "/x".into()
            }
        );
    }

    #[test]
    fn test_post_without_body_is_missing() {
        let err = build(r#"#[http(post="/x")]"#, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenErrorKind::MissingBody { .. }));
    }

    #[rstest]
    #[case(r#"#[http(post="/x", body="*")]"#)]
    #[case(r#"#[http(post="/x", body="")]"#)]
    #[case(r#"#[http(put="/x", body="*")]"#)]
    fn test_whole_body(#[case] line: &str) {
        let rule = build(line, &GeneratorConfig::default()).unwrap();
        assert!(rule.has_body());
        assert_eq!(rule.body(), &BodySelector::Whole);
        assert!(!rule.has_path_variables());
    }

    #[test]
    fn test_field_body_is_snake_cased() {
        let rule = build(
            r#"#[http(put="/x/{id}", body="itemInfo.displayName")]"#,
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(rule.body(), &field(&["item_info", "display_name"]));
    }

    #[rstest]
    #[case(false, Err(GenErrorKind::InvalidBody { verb: "DELETE".into(), path: "/x".into() }))]
    #[case(true, Ok(BodySelector::Whole))]
    fn test_delete_body(#[case] allow: bool, #[case] expected: Result<BodySelector, GenErrorKind>) {
        let config = GeneratorConfig {
            allow_delete_body: allow,
            ..GeneratorConfig::default()
        };
        match (build(r#"#[http(delete="/x", body="*")]"#, &config), expected) {
            (Ok(rule), Ok(selector)) => {
                assert!(rule.has_body());
                assert_eq!(rule.body(), &selector);
            }
            (Err(err), Err(expected)) => assert_eq!(err, expected),
            (got, expected) => panic!("got {got:?}, expected {expected:?}"),
        }
    }

    #[test]
    fn test_delete_without_body() {
        let rule = build(r#"#[http(delete="/x/{id}")]"#, &GeneratorConfig::default()).unwrap();
        assert!(!rule.has_body());
        assert!(rule.has_path_variables());
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_patch_without_body(#[case] allow: bool) {
        let config = GeneratorConfig {
            allow_empty_patch_body: allow,
            ..GeneratorConfig::default()
        };
        let result = build(r#"#[http(patch="/x")]"#, &config);
        if allow {
            assert!(!result.unwrap().has_body());
        } else {
            assert!(matches!(result, Err(GenErrorKind::MissingBody { .. })));
        }
    }

    #[test]
    fn test_patch_with_field_body() {
        let rule = build(r#"#[http(patch="/v1/items/{id}", body="name")]"#, &GeneratorConfig::default())
            .unwrap();
        assert!(rule.has_body());
        assert_eq!(rule.body(), &field(&["name"]));
    }

    #[test]
    fn test_verb_is_canonicalized() {
        let rule = build(r#"#[http(GET="/x")]"#, &GeneratorConfig::default()).unwrap();
        assert_eq!(rule.verb(), &Verb::Standard(HttpMethod::Get));
        assert_eq!(rule.verb().as_str(), "GET");
    }

    #[test]
    fn test_custom_route() {
        let rule = build(r#"#[http(route="link", path="/v1/items/{id}")]"#, &GeneratorConfig::default())
            .unwrap();
        assert!(rule.is_custom());
        assert_eq!(rule.verb().as_str(), "link");
        assert_eq!(rule.path(), "/v1/items/:id");
        assert!(!rule.has_body());
    }

    #[test]
    fn test_custom_route_body_is_advisory() {
        let rule = build(
            r#"#[http(route="LINK", path="/v1/items/{id}", body="*")]"#,
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert!(rule.has_body());
        assert_eq!(rule.body(), &BodySelector::Whole);
    }

    #[rstest]
    #[case(r#"#[http(body="*")]"#)]
    #[case(r#"#[http(get)]"#)]
    #[case(r#"#[http(get="")]"#)]
    #[case(r#"#[http(get="/x", post="/y", body="*")]"#)]
    #[case(r#"#[http(route="LINK")]"#)]
    #[case(r#"#[http(route="", path="/x")]"#)]
    fn test_missing_route(#[case] line: &str) {
        let err = build(line, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenErrorKind::MissingRoute(_)), "{err:?}");
    }

    #[test]
    fn test_path_without_route_is_rejected() {
        let err = build(r#"#[http(get="/x", path="/y")]"#, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GenErrorKind::Syntax(_)));
    }

    #[rstest]
    #[case("*", BodySelector::Whole)]
    #[case("", BodySelector::Whole)]
    #[case("list", field(&["list"]))]
    #[case("pageInfo.total", field(&["page_info", "total"]))]
    #[case("_id", field(&["_id"]))]
    #[case("__rawValue", field(&["__raw_value"]))]
    fn test_response_body(#[case] value: &str, #[case] expected: BodySelector) {
        let line = format!(r#"#[http(get="/v1/items", response_body="{value}")]"#);
        let rule = build(&line, &GeneratorConfig::default()).unwrap();
        assert_eq!(rule.response_body(), &expected);
    }

    #[rstest]
    #[case("a..b")]
    #[case("1st")]
    #[case(".")]
    #[case("_")]
    #[case("type")]
    #[case("item.self")]
    fn test_invalid_selector(#[case] value: &str) {
        assert!(matches!(normalize_selector(value), Err(GenErrorKind::Syntax(_))));
    }

    #[test]
    fn test_path_rewrite_both_variables() {
        let rule = build(r#"#[http(get="/v1/items/{id}/sub/{sub_id}")]"#, &GeneratorConfig::default())
            .unwrap();
        assert_eq!(rule.path(), "/v1/items/:id/sub/:sub_id");
        assert!(rule.has_path_variables());

        let config = GeneratorConfig {
            path_style: PathStyle::Brace,
            ..GeneratorConfig::default()
        };
        let rule = build(r#"#[http(get="/v1/items/:id")]"#, &config).unwrap();
        assert_eq!(rule.path(), "/v1/items/{id}");
    }

    #[test]
    fn test_build_rules_keeps_order() {
        let directives = vec![
            directive(r#"#[http(get="/v1/dicts/{id}")]"#),
            directive(r#"#[http(get="/v1/dict/{id}")]"#),
        ];
        let rules = build_rules(&directives, &GeneratorConfig::default()).unwrap();
        let paths: Vec<_> = rules.iter().map(RouteRule::path).collect();
        assert_eq!(paths, vec!["/v1/dicts/:id", "/v1/dict/:id"]);
    }

    #[test]
    fn test_build_rules_rejects_duplicates() {
        let directives = vec![
            directive(r#"#[http(get="/v1/dicts/{id}")]"#),
            directive(r#"#[http(get="/v1/dicts/:id")]"#),
        ];
        let err = build_rules(&directives, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.directive, r#"#[http(get="/v1/dicts/:id")]"#);
        assert_eq!(
            err.kind,
            GenErrorKind::DuplicateRoute {
                verb: "GET".into(),
                path: "/v1/dicts/:id".into()
            }
        );
    }

    #[test]
    fn test_same_path_different_verbs_is_fine() {
        let directives = vec![
            directive(r#"#[http(get="/v1/dicts/{id}")]"#),
            directive(r#"#[http(delete="/v1/dicts/{id}")]"#),
        ];
        assert_eq!(build_rules(&directives, &GeneratorConfig::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_policy_table_covers_every_standard_verb() {
        for method in HttpMethod::ALL {
            assert!(BODY_POLICIES.iter().any(|(m, _)| *m == method), "{method} has no policy");
        }
    }
}
