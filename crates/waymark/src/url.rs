// File: src/url.rs
// Purpose: URL generation and parsing for route paths

use crate::error::NavError;
use crate::route_def::RouteDef;
use crate::walker::{accumulated_params_at, walk, OnNotFound, WalkStep};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use waymark_params::{validate_and_clean_params, ParamValue, RawValue, Validated};

/// Absolute-URL detection: a run of non-`.` characters followed by `://`,
/// so `myapp://...` counts but `example.com/...` does not
static SCHEME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^.]+?://").expect("scheme pattern is valid"));

/// Options for URL generation
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Fail on parameter validation errors (default). When `false`, a
    /// failed validation falls back to the raw values as supplied so a
    /// URL is still produced.
    pub should_validate: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            should_validate: true,
        }
    }
}

/// A URL string decomposed into path segments and raw query parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedUrl {
    pub path: Vec<String>,
    pub params: HashMap<String, RawValue>,
}

/// Outcome of validating an externally supplied URL
///
/// Errors are returned as data, never raised: route-not-found errors
/// first, then parameter errors, in stable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UrlValidation {
    Valid,
    Invalid { errors: Vec<String> },
}

impl UrlValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, UrlValidation::Valid)
    }
}

/// Split a URL string into path segments and raw query parameters
///
/// Accepts an optional leading slash and an optional absolute
/// `scheme://host` prefix; both are discarded. Fragments are dropped.
/// Path splitting is literal: doubled or trailing separators yield
/// empty-string segments, which are never-matching route names rather
/// than being normalized away.
///
/// # Examples
///
/// ```
/// use waymark::url::parse_url;
/// use waymark_params::RawValue;
///
/// let parsed = parse_url("profile?id=42");
/// assert_eq!(parsed.path, vec!["profile".to_string()]);
/// assert_eq!(parsed.params.get("id"), Some(&RawValue::Single("42".to_string())));
///
/// let parsed = parse_url("myapp://host/settings/account");
/// assert_eq!(parsed.path, vec!["settings".to_string(), "account".to_string()]);
/// ```
pub fn parse_url(url: &str) -> ParsedUrl {
    let rest = url.strip_prefix('/').unwrap_or(url);

    // Absolute URLs: discard the scheme and host, keep path + query
    let rest = match SCHEME_PATTERN.find(rest) {
        Some(scheme) => {
            let after_scheme = &rest[scheme.end()..];
            match after_scheme.find(|c| c == '/' || c == '?' || c == '#') {
                // The slash that ends the host is the root of the path
                Some(pos) if after_scheme[pos..].starts_with('/') => &after_scheme[pos + 1..],
                Some(pos) => &after_scheme[pos..],
                None => "",
            }
        }
        None => rest,
    };

    // Fragments never reach the route engine
    let rest = match rest.find('#') {
        Some(pos) => &rest[..pos],
        None => rest,
    };

    let (path_part, query_part) = match rest.find('?') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };

    let path: Vec<String> = path_part.split('/').map(str::to_string).collect();

    ParsedUrl {
        path,
        params: parse_query(query_part),
    }
}

/// Parse a query string into raw parameter values
fn parse_query(query: &str) -> HashMap<String, RawValue> {
    let mut params: HashMap<String, RawValue> = HashMap::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }

        // A bare key (`?flag`) parses as an empty-string value
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));

        let key = urlencoding::decode(raw_key).unwrap_or_default().into_owned();
        let value = urlencoding::decode(raw_value).unwrap_or_default().into_owned();

        // Repeated keys become lists, mirroring standard query syntax
        match params.remove(&key) {
            None => {
                params.insert(key, RawValue::Single(value));
            }
            Some(RawValue::Single(first)) => {
                params.insert(key, RawValue::Many(vec![first, value]));
            }
            Some(RawValue::Many(mut items)) => {
                items.push(value);
                params.insert(key, RawValue::Many(items));
            }
        }
    }

    params
}

/// Serialize cleaned parameters as a query string
///
/// Keys are emitted in sorted order; null values and empty strings are
/// skipped; list values repeat the key once per element.
fn stringify_query(params: &HashMap<String, ParamValue>) -> String {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();

    let mut pairs: Vec<String> = Vec::new();
    for key in keys {
        let value = &params[key];
        if value.is_skipped_in_query() {
            continue;
        }
        match value {
            ParamValue::List(items) => {
                for item in items {
                    if !item.is_skipped_in_query() {
                        pairs.push(encode_pair(key, item));
                    }
                }
            }
            scalar => pairs.push(encode_pair(key, scalar)),
        }
    }

    pairs.join("&")
}

fn encode_pair(key: &str, value: &ParamValue) -> String {
    format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(&value.to_query_string())
    )
}

/// Generate a URL for `path` with `params`, validating against the
/// schema accumulated along the path
pub(crate) fn generate_url_from_segments(
    root: &RouteDef,
    path: &[String],
    params: &HashMap<String, ParamValue>,
    options: GenerateOptions,
) -> Result<String, NavError> {
    let schema = accumulated_params_at(root, path, OnNotFound::Error)?;

    let cleaned = match validate_and_clean_params(params, &schema) {
        Validated::Valid { params } => params,
        Validated::Invalid { errors } => {
            if options.should_validate {
                return Err(NavError::NotFound {
                    message: errors.join("\n"),
                    path: path.to_vec(),
                    params: Some(params.clone()),
                });
            }
            // Caller opted out of strictness: build the URL from the raw
            // values as supplied
            params.clone()
        }
    };

    let query = stringify_query(&cleaned);
    let path_str = path.join("/");

    Ok(if query.is_empty() {
        path_str
    } else {
        format!("{path_str}?{query}")
    })
}

/// Check an externally supplied URL against the route tree
pub(crate) fn validate_url_against(root: &RouteDef, url: &str) -> UrlValidation {
    let ParsedUrl { path, params } = parse_url(url);

    let mut errors = Vec::new();

    // Route errors come before parameter errors
    if walk(root, &path).any(|step| matches!(step, WalkStep::NotFound { .. })) {
        errors.push(format!(
            "Unable to find route for the url path {}",
            path.join("/")
        ));
    }

    // Validate against whatever schema the resolved prefix accumulated;
    // ignore-mode accumulation cannot fail
    let schema = accumulated_params_at(root, &path, OnNotFound::Ignore).unwrap_or_default();

    let raw_params: HashMap<String, ParamValue> = params
        .into_iter()
        .map(|(key, value)| (key, value.into()))
        .collect();

    if let Validated::Invalid {
        errors: param_errors,
    } = validate_and_clean_params(&raw_params, &schema)
    {
        errors.extend(param_errors);
    }

    if errors.is_empty() {
        UrlValidation::Valid
    } else {
        tracing::debug!("URL `{}` failed validation: {}", url, errors.join("; "));
        UrlValidation::Invalid { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route_def::{LeafDef, StackDef};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use waymark_params::ParamType;

    fn tree() -> RouteDef {
        StackDef::new()
            .route("home", LeafDef::new())
            .route(
                "profile",
                LeafDef::new().param("id", ParamType::text().required()),
            )
            .into()
    }

    fn path_of(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn params_of(entries: Vec<(&str, ParamValue)>) -> HashMap<String, ParamValue> {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[rstest]
    #[case("profile", vec!["profile"])]
    #[case("/profile", vec!["profile"])]
    #[case("http://example.com/profile", vec!["profile"])]
    #[case("myapp://host/settings/account", vec!["settings", "account"])]
    #[case("profile/", vec!["profile", ""])]
    #[case("a//b", vec!["a", "", "b"])]
    #[case("", vec![""])]
    #[case("http://example.com", vec![""])]
    #[case("profile#section", vec!["profile"])]
    fn test_parse_url_paths(#[case] url: &str, #[case] expected: Vec<&str>) {
        let parsed = parse_url(url);
        assert_eq!(parsed.path, path_of(&expected));
    }

    #[test]
    fn test_parse_url_single_param() {
        let parsed = parse_url("profile?id=42");
        assert_eq!(parsed.path, path_of(&["profile"]));
        assert_eq!(
            parsed.params.get("id"),
            Some(&RawValue::Single("42".to_string()))
        );
    }

    #[test]
    fn test_parse_url_repeated_keys_become_lists() {
        let parsed = parse_url("items?id=1&id=2&id=3");
        assert_eq!(
            parsed.params.get("id"),
            Some(&RawValue::Many(vec![
                "1".to_string(),
                "2".to_string(),
                "3".to_string()
            ]))
        );
    }

    #[test]
    fn test_parse_url_bare_key_is_empty_string() {
        let parsed = parse_url("profile?flag");
        assert_eq!(
            parsed.params.get("flag"),
            Some(&RawValue::Single(String::new()))
        );
    }

    #[test]
    fn test_parse_url_percent_decodes() {
        let parsed = parse_url("profile?name=J%C3%BCrgen&q=a%20b");
        assert_eq!(
            parsed.params.get("name"),
            Some(&RawValue::Single("Jürgen".to_string()))
        );
        assert_eq!(
            parsed.params.get("q"),
            Some(&RawValue::Single("a b".to_string()))
        );
    }

    #[test]
    fn test_parse_url_query_with_scheme_and_no_path() {
        let parsed = parse_url("myapp://host?x=1");
        assert_eq!(parsed.path, path_of(&[""]));
        assert_eq!(
            parsed.params.get("x"),
            Some(&RawValue::Single("1".to_string()))
        );
    }

    #[test]
    fn test_generate_url_with_params() {
        let root = tree();
        let url = generate_url_from_segments(
            &root,
            &path_of(&["profile"]),
            &params_of(vec![("id", ParamValue::Text("42".into()))]),
            GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(url, "profile?id=42");
    }

    #[test]
    fn test_generate_url_without_params_has_no_question_mark() {
        let root = tree();
        let url = generate_url_from_segments(
            &root,
            &path_of(&["home"]),
            &HashMap::new(),
            GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(url, "home");
    }

    #[test]
    fn test_generate_url_drops_null_values() {
        let root = tree();
        let url = generate_url_from_segments(
            &root,
            &path_of(&["profile"]),
            &params_of(vec![("id", ParamValue::Null)]),
            GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(url, "profile");
    }

    #[test]
    fn test_generate_url_drops_empty_strings() {
        let root = tree();
        let url = generate_url_from_segments(
            &root,
            &path_of(&["profile"]),
            &params_of(vec![("id", ParamValue::Text(String::new()))]),
            GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(url, "profile");
    }

    #[test]
    fn test_generate_url_sorts_keys_and_encodes() {
        let root: RouteDef = StackDef::new()
            .route(
                "search",
                LeafDef::new()
                    .param("q", ParamType::text())
                    .param("lang", ParamType::text()),
            )
            .into();

        let url = generate_url_from_segments(
            &root,
            &path_of(&["search"]),
            &params_of(vec![
                ("q", ParamValue::Text("a b".into())),
                ("lang", ParamValue::Text("de".into())),
            ]),
            GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(url, "search?lang=de&q=a%20b");
    }

    #[test]
    fn test_generate_url_repeats_keys_for_lists() {
        let root: RouteDef = StackDef::new()
            .route("items", LeafDef::new().param("id", ParamType::number()))
            .into();

        let url = generate_url_from_segments(
            &root,
            &path_of(&["items"]),
            &params_of(vec![(
                "id",
                ParamValue::List(vec![ParamValue::Number(1.0), ParamValue::Number(2.0)]),
            )]),
            GenerateOptions::default(),
        )
        .unwrap();

        assert_eq!(url, "items?id=1&id=2");
    }

    #[test]
    fn test_generate_url_unknown_path_fails() {
        let root = tree();
        let err = generate_url_from_segments(
            &root,
            &path_of(&["nowhere"]),
            &HashMap::new(),
            GenerateOptions::default(),
        )
        .unwrap_err();

        match err {
            NavError::NotFound { path, params, .. } => {
                assert_eq!(path, path_of(&["nowhere"]));
                assert!(params.is_none());
            }
            other => panic!("expected not-found error, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_url_invalid_params_fail_with_messages() {
        let root = tree();
        let err = generate_url_from_segments(
            &root,
            &path_of(&["profile"]),
            &HashMap::new(),
            GenerateOptions::default(),
        )
        .unwrap_err();

        match err {
            NavError::NotFound {
                message,
                path,
                params,
            } => {
                assert_eq!(message, "Missing required parameter `id`");
                assert_eq!(path, path_of(&["profile"]));
                assert_eq!(params, Some(HashMap::new()));
            }
            other => panic!("expected not-found error, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_url_validation_opt_out_uses_raw_params() {
        let root = tree();
        let url = generate_url_from_segments(
            &root,
            &path_of(&["profile"]),
            &params_of(vec![("unexpected", ParamValue::Text("x".into()))]),
            GenerateOptions {
                should_validate: false,
            },
        )
        .unwrap();

        assert_eq!(url, "profile?unexpected=x");
    }

    #[test]
    fn test_round_trip_without_params() {
        let root = tree();
        let path = path_of(&["home"]);

        let url =
            generate_url_from_segments(&root, &path, &HashMap::new(), GenerateOptions::default())
                .unwrap();
        let parsed = parse_url(&url);

        assert_eq!(parsed.path, path);
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn test_round_trip_with_params() {
        let root = tree();
        let path = path_of(&["profile"]);

        let url = generate_url_from_segments(
            &root,
            &path,
            &params_of(vec![("id", ParamValue::Text("42".into()))]),
            GenerateOptions::default(),
        )
        .unwrap();
        let parsed = parse_url(&url);

        assert_eq!(parsed.path, path);
        assert_eq!(
            parsed.params.get("id"),
            Some(&RawValue::Single("42".to_string()))
        );
    }

    #[test]
    fn test_validate_url_unknown_path() {
        let root = tree();
        let result = validate_url_against(&root, "unknown");

        assert_eq!(
            result,
            UrlValidation::Invalid {
                errors: vec!["Unable to find route for the url path unknown".to_string()]
            }
        );
    }

    #[test]
    fn test_validate_url_ok() {
        let root = tree();
        assert!(validate_url_against(&root, "profile?id=42").is_valid());
        assert!(validate_url_against(&root, "home").is_valid());
    }

    #[test]
    fn test_validate_url_missing_required_param() {
        let root = tree();
        let result = validate_url_against(&root, "profile");

        assert_eq!(
            result,
            UrlValidation::Invalid {
                errors: vec!["Missing required parameter `id`".to_string()]
            }
        );
    }

    #[test]
    fn test_validate_url_route_errors_come_first() {
        let root = tree();
        let result = validate_url_against(&root, "unknown?bogus=1");

        match result {
            UrlValidation::Invalid { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0], "Unable to find route for the url path unknown");
                assert_eq!(errors[1], "Unknown parameter `bogus`");
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_url_trailing_slash_is_not_found() {
        let root = tree();
        let result = validate_url_against(&root, "home/");

        assert_eq!(
            result,
            UrlValidation::Invalid {
                errors: vec!["Unable to find route for the url path home/".to_string()]
            }
        );
    }
}
