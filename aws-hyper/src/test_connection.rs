/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::header::HeaderName;
use http::Request;
use protocol_test_helpers::{assert_ok, validate_body, MediaType};
use smithy_http::body::SdkBody;
use std::future::Ready;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tower::BoxError;

type ConnectVec<B> = Vec<(http::Request<SdkBody>, http::Response<B>)>;

/// A request received by a [`TestConnection`] paired with the request it expected
///
/// `expected` is `None` for requests that arrived after every canned response was used.
#[derive(Debug)]
pub struct ValidateRequest {
    pub expected: Option<http::Request<SdkBody>>,
    pub actual: http::Request<SdkBody>,
}

impl ValidateRequest {
    /// Assert that the actual request matches the expected one
    ///
    /// Every expected header not in `ignore_headers` must be present with the same value. JSON
    /// bodies are compared structurally, anything else byte for byte.
    pub fn assert_matches(&self, ignore_headers: &[HeaderName]) {
        let actual = &self.actual;
        let expected = self.expected.as_ref().unwrap_or_else(|| {
            panic!("unexpected request to {}: no response was left", actual.uri())
        });
        for (name, value) in expected.headers() {
            if !ignore_headers.contains(name) {
                let actual_header = actual
                    .headers()
                    .get(name)
                    .unwrap_or_else(|| panic!("Header {:?} missing", name));
                assert_eq!(actual_header, value, "Header mismatch for {:?}", name);
            }
        }
        let actual_body = actual.body().bytes().unwrap_or(&[]);
        let expected_body = expected.body().bytes().unwrap_or(&[]);
        match (
            std::str::from_utf8(actual_body),
            std::str::from_utf8(expected_body),
        ) {
            (Ok(actual_str), Ok(expected_str)) if is_json(expected) => {
                assert_ok(validate_body(actual_str, expected_str, MediaType::Json))
            }
            (Ok(actual_str), Ok(expected_str)) => assert_eq!(actual_str, expected_str),
            _ => assert_eq!(actual_body, expected_body),
        };
        assert_eq!(actual.uri(), expected.uri());
    }
}

fn is_json(request: &http::Request<SdkBody>) -> bool {
    request
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|content_type| content_type.contains("json"))
        .unwrap_or(false)
}

/// TestConnection for use with a [`aws_hyper::Client`](crate::Client)
///
/// A basic test connection. It will:
/// - Respond to requests with a preloaded series of responses
/// - Record requests for future examination
///
/// When it runs out of responses, further requests are still recorded but fail with a dispatch
/// error.
///
/// For more complex use cases, see [Tower Test](https://docs.rs/tower-test/0.4.0/tower_test/)
/// Usage example:
/// ```rust
/// use aws_hyper::test_connection::TestConnection;
/// use smithy_http::body::SdkBody;
/// let events = vec![(
///    http::Request::new(SdkBody::from("request body")),
///    http::Response::builder()
///        .status(200)
///        .body("response body")
///        .unwrap(),
/// )];
/// let conn = TestConnection::new(events);
/// let client = aws_hyper::Client::new(conn);
/// ```
#[derive(Debug)]
pub struct TestConnection<B> {
    data: Arc<Mutex<ConnectVec<B>>>,
    requests: Arc<Mutex<Vec<ValidateRequest>>>,
}

// derive would require `B: Clone`
impl<B> Clone for TestConnection<B> {
    fn clone(&self) -> Self {
        TestConnection {
            data: self.data.clone(),
            requests: self.requests.clone(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<B> TestConnection<B> {
    pub fn new(mut data: ConnectVec<B>) -> Self {
        data.reverse();
        TestConnection {
            data: Arc::new(Mutex::new(data)),
            requests: Default::default(),
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> impl Deref<Target = Vec<ValidateRequest>> + '_ {
        lock(&self.requests)
    }

    /// Assert that every received request matches its expected request
    pub fn assert_requests_match(&self, ignore_headers: &[HeaderName]) {
        for req in self.requests().iter() {
            req.assert_matches(ignore_headers)
        }
        let remaining = lock(&self.data).len();
        assert_eq!(remaining, 0, "{} expected requests were never sent", remaining);
    }
}

impl<B> tower::Service<http::Request<SdkBody>> for TestConnection<B>
where
    SdkBody: From<B>,
{
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, actual: Request<SdkBody>) -> Self::Future {
        let next = lock(&self.data).pop();
        let (expected, result) = match next {
            Some((expected, resp)) => (Some(expected), Ok(resp.map(SdkBody::from))),
            None => (None, Err("no canned response left".into())),
        };
        lock(&self.requests).push(ValidateRequest { expected, actual });
        std::future::ready(result)
    }
}
