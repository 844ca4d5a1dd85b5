/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Assertions used by generated protocol tests and hand-written service tests to validate
//! serialized requests: headers, query strings and bodies.

use assert_json_diff::assert_json_eq_no_panic;
use http::{Request, Uri};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProtocolTestFailure {
    #[error("query string is missing `{expected}` (found {found:?})")]
    MissingQueryParam {
        expected: String,
        found: Vec<String>,
    },
    #[error("query string must not contain the key `{expected}`")]
    ForbiddenQueryParam { expected: String },
    #[error("query string must contain the key `{expected}`")]
    RequiredQueryParam { expected: String },

    #[error("header `{key}` is `{found}`, expected `{expected}`")]
    InvalidHeader {
        key: String,
        expected: String,
        found: String,
    },
    #[error("header `{expected}` is missing")]
    MissingHeader { expected: String },
    #[error("body did not match:\n{hint}")]
    BodyDidNotMatch {
        expected: String,
        found: String,
        hint: String,
    },
    #[error("body is not valid {expected}: {found}")]
    InvalidBodyFormat { expected: String, found: String },
}

/// Panic with the `Display` form of a failure
///
/// `Debug` output of a body mismatch is unreadable; this prints the JSON diff line by line.
#[track_caller]
pub fn assert_ok(result: Result<(), ProtocolTestFailure>) {
    if let Err(failure) = result {
        eprintln!("{}", failure);
        panic!("protocol test failed");
    }
}

/// The `&`-separated parameters of a request URI, still percent-encoded
struct Query<'a> {
    params: HashSet<&'a str>,
}

impl<'a> Query<'a> {
    fn of(uri: &'a Uri) -> Self {
        Query {
            params: uri
                .query()
                .unwrap_or_default()
                .split('&')
                .filter(|param| !param.is_empty())
                .collect(),
        }
    }

    fn has_param(&self, param: &str) -> bool {
        self.params.contains(param)
    }

    fn has_key(&self, key: &str) -> bool {
        self.params
            .iter()
            .any(|param| param.split('=').next() == Some(key))
    }

    fn sorted(&self) -> Vec<String> {
        let mut params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        params.sort();
        params
    }
}

/// Every `expected_params` entry (`key=value` or a bare `key`) must appear verbatim in the
/// query string. Values are compared in their percent-encoded form.
pub fn validate_query_string<B>(
    request: &Request<B>,
    expected_params: &[&str],
) -> Result<(), ProtocolTestFailure> {
    let query = Query::of(request.uri());
    match expected_params.iter().find(|param| !query.has_param(param)) {
        Some(missing) => Err(ProtocolTestFailure::MissingQueryParam {
            expected: missing.to_string(),
            found: query.sorted(),
        }),
        None => Ok(()),
    }
}

/// None of `forbid_keys` may appear as a key, with or without a value
pub fn forbid_query_params<B>(
    request: &Request<B>,
    forbid_keys: &[&str],
) -> Result<(), ProtocolTestFailure> {
    let query = Query::of(request.uri());
    match forbid_keys.iter().find(|key| query.has_key(key)) {
        Some(key) => Err(ProtocolTestFailure::ForbiddenQueryParam {
            expected: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// Each of `require_keys` must appear as a key; values are not checked
pub fn require_query_params<B>(
    request: &Request<B>,
    require_keys: &[&str],
) -> Result<(), ProtocolTestFailure> {
    let query = Query::of(request.uri());
    match require_keys.iter().find(|key| !query.has_key(key)) {
        Some(key) => Err(ProtocolTestFailure::RequiredQueryParam {
            expected: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// Header names are case insensitive, values are not. Repeated headers are joined with `, `
/// before comparing, so `("x-list", "a, b")` matches both one header and two.
pub fn validate_headers<B>(
    request: &Request<B>,
    expected_headers: &[(&str, &str)],
) -> Result<(), ProtocolTestFailure> {
    for (key, expected) in expected_headers {
        let values = request.headers().get_all(*key);
        let found = values
            .iter()
            .map(|value| value.to_str().unwrap_or("<non-utf8 header>"))
            .collect::<Vec<_>>();
        if found.is_empty() {
            return Err(ProtocolTestFailure::MissingHeader {
                expected: key.to_string(),
            });
        }
        let found = found.join(", ");
        if found != *expected {
            return Err(ProtocolTestFailure::InvalidHeader {
                key: key.to_string(),
                expected: expected.to_string(),
                found,
            });
        }
    }
    Ok(())
}

/// How a body should be compared
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MediaType {
    /// Structural comparison: key order and whitespace are ignored
    Json,
    /// Exact string comparison
    Other(String),
}

impl<T: AsRef<str>> From<T> for MediaType {
    fn from(inp: T) -> Self {
        let inp = inp.as_ref();
        if inp.contains("json") {
            MediaType::Json
        } else {
            MediaType::Other(inp.to_string())
        }
    }
}

pub fn validate_body<T: AsRef<[u8]>>(
    actual_body: T,
    expected_body: &str,
    media_type: MediaType,
) -> Result<(), ProtocolTestFailure> {
    let actual_body = std::str::from_utf8(actual_body.as_ref()).map_err(|_| {
        ProtocolTestFailure::InvalidBodyFormat {
            expected: "UTF-8 encoded string".to_string(),
            found: "Non UTF-8 data".to_string(),
        }
    })?;
    match media_type {
        MediaType::Json => try_json_eq(actual_body, expected_body),
        MediaType::Other(_) if actual_body == expected_body => Ok(()),
        MediaType::Other(_) => Err(ProtocolTestFailure::BodyDidNotMatch {
            expected: expected_body.to_string(),
            found: actual_body.to_string(),
            hint: "bodies differ".to_string(),
        }),
    }
}

fn try_json_eq(actual: &str, expected: &str) -> Result<(), ProtocolTestFailure> {
    let parse = |body: &str| {
        serde_json::from_str::<Value>(body).map_err(|err| ProtocolTestFailure::InvalidBodyFormat {
            expected: "json".to_string(),
            found: format!("{}: {}", err, body),
        })
    };
    let (actual_json, expected_json) = (parse(actual)?, parse(expected)?);
    assert_json_eq_no_panic(&actual_json, &expected_json).map_err(|hint| {
        ProtocolTestFailure::BodyDidNotMatch {
            expected: expected.to_string(),
            found: actual.to_string(),
            hint,
        }
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        forbid_query_params, require_query_params, validate_body, validate_headers,
        validate_query_string, MediaType, ProtocolTestFailure,
    };
    use http::Request;

    #[test]
    fn test_validate_empty_query_string() {
        let request = Request::builder().uri("/foo").body(()).unwrap();
        validate_query_string(&request, &[]).expect("no required params should pass");
        validate_query_string(&request, &["a"])
            .err()
            .expect("no params provided");
    }

    #[test]
    fn test_validate_query_string() {
        let request = Request::builder()
            .uri("/v1/apis?maxResults=25&nextToken=abc%2Bdef&flag")
            .body(())
            .unwrap();
        validate_query_string(&request, &["maxResults=25"]).expect("present");
        validate_query_string(&request, &["flag", "maxResults=25"])
            .expect("both params are in the query string");
        validate_query_string(&request, &["maxResults=25", "nextToken=abc%2Bdef", "flag"])
            .expect("all params are in the query string");

        validate_query_string(&request, &["maxResults"]).expect_err("no parameter should match");
        validate_query_string(&request, &["maxResults=2"]).expect_err("no parameter should match");
        validate_query_string(&request, &["nextToken=abc+def"])
            .expect_err("values are compared encoded");
    }

    #[test]
    fn test_forbid_query_param() {
        let request = Request::builder()
            .uri("/foo?a=b&c&d=efg&hello=a%20b")
            .body(())
            .unwrap();
        forbid_query_params(&request, &["a"]).expect_err("a is a query param");
        forbid_query_params(&request, &["not_included"]).expect("query param not included");
        forbid_query_params(&request, &["a=b"]).expect("should be matching against keys");
        forbid_query_params(&request, &["c"]).expect_err("c is a query param");
    }

    #[test]
    fn test_require_query_param() {
        let request = Request::builder()
            .uri("/foo?a=b&c&d=efg&hello=a%20b")
            .body(())
            .unwrap();
        require_query_params(&request, &["a"]).expect("a is a query param");
        require_query_params(&request, &["not_included"]).expect_err("query param not included");
        require_query_params(&request, &["a=b"]).expect_err("should be matching against keys");
        require_query_params(&request, &["c"]).expect("c is a query param");
    }

    #[test]
    fn test_validate_headers() {
        let request = Request::builder()
            .uri("/")
            .header("X-Foo", "foo")
            .header("X-Foo-List", "foo")
            .header("X-Foo-List", "bar")
            .header("X-Inline", "inline, other")
            .body(())
            .unwrap();

        validate_headers(&request, &[("X-Foo", "foo")]).expect("header present");
        validate_headers(&request, &[("X-Foo", "Foo")]).expect_err("case sensitive");
        validate_headers(&request, &[("x-foo-list", "foo, bar")]).expect("list concat");
        validate_headers(&request, &[("X-Foo-List", "foo")])
            .expect_err("all list members must be specified");
        validate_headers(&request, &[("X-Inline", "inline, other")])
            .expect("inline header lists also work");
        assert_eq!(
            validate_headers(&request, &[("missing", "value")]),
            Err(ProtocolTestFailure::MissingHeader {
                expected: "missing".to_owned()
            })
        );
    }

    #[test]
    fn test_validate_json_body() {
        let expected = r#"{"name": "my-pipeline", "uniqueId": "token", "tags": []}"#;
        let actual = r#"{"uniqueId":"token","name":"my-pipeline","tags":[]}"#;
        validate_body(actual, expected, MediaType::Json).expect("inputs matched as JSON");

        validate_body(r#"{"name": "other"}"#, expected, MediaType::Json)
            .expect_err("bodies do not match");
        assert!(matches!(
            validate_body("not json", expected, MediaType::Json),
            Err(ProtocolTestFailure::InvalidBodyFormat { .. })
        ));
    }

    #[test]
    fn test_validate_non_json_body() {
        let expected = "hello";
        validate_body("hello", expected, MediaType::from("text/plain")).expect("same string");
        validate_body("hello!", expected, MediaType::from("text/plain"))
            .expect_err("different strings");
        assert_eq!(
            MediaType::from("application/x-amz-json-1.1"),
            MediaType::Json
        );
    }
}
