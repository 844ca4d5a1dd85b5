/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Runtime agnostic middleware
//!
//! Request middleware are plain [`MapRequest`] implementations: endpoint resolution, signing,
//! credentials and user agents all read what they need from the property bag. On the way back,
//! [`load_response`] reads the body and hands it to the operation's parser.
//! `smithy-http-tower` adapts both to `tower`.

use crate::body::SdkBody;
use crate::operation;
use crate::response::ParseHttpResponse;
use crate::result::{SdkError, SdkSuccess};
use std::error::Error;
use tracing::trace;

type BoxError = Box<dyn Error + Send + Sync>;

/// A synchronous, fallible transformation of an [`operation::Request`]
///
/// ```rust
/// # use smithy_http::middleware::MapRequest;
/// # use smithy_http::operation;
/// # use std::convert::Infallible;
/// use http::HeaderValue;
///
/// /// Present in the property bag when the caller supplied an idempotency token
/// struct ClientToken(HeaderValue);
///
/// struct ClientTokenStage;
///
/// impl MapRequest for ClientTokenStage {
///     type Error = Infallible;
///
///     fn apply(&self, request: operation::Request) -> Result<operation::Request, Infallible> {
///         request.augment(|mut request, properties| {
///             if let Some(ClientToken(token)) = properties.get::<ClientToken>() {
///                 request.headers_mut().insert("x-client-token", token.clone());
///             }
///             Ok(request)
///         })
///     }
/// }
/// ```
pub trait MapRequest {
    /// Use [`Infallible`](std::convert::Infallible) for stages that cannot fail
    type Error: Into<BoxError>;

    /// Name of the tracing span the stage runs in
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn apply(&self, request: operation::Request) -> Result<operation::Request, Self::Error>;
}

/// Parse `response` with `handler`, reading the body first unless the handler finishes early
///
/// The raw response is kept on both success and failure. A body that cannot be read becomes
/// [`SdkError::ResponseError`]; a parser error becomes [`SdkError::ServiceError`].
pub async fn load_response<T, E, O>(
    mut response: http::Response<SdkBody>,
    handler: &O,
) -> Result<SdkSuccess<T>, SdkError<E>>
where
    O: ParseHttpResponse<SdkBody, Output = Result<T, E>>,
{
    if let Some(parsed) = handler.parse_unloaded(&mut response) {
        trace!(response = ?response, "parsed response before reading the body");
        return into_sdk_result(parsed, response);
    }

    let body = std::mem::replace(response.body_mut(), SdkBody::taken());
    let body = match hyper::body::to_bytes(body).await {
        Ok(body) => body,
        Err(err) => return Err(SdkError::ResponseError { raw: response, err }),
    };
    trace!(response = ?response, body = ?body, "read response body");

    let loaded = response.map(|_| body);
    let parsed = handler.parse_loaded(&loaded);
    into_sdk_result(parsed, loaded.map(SdkBody::from))
}

fn into_sdk_result<T, E>(
    parsed: Result<T, E>,
    raw: http::Response<SdkBody>,
) -> Result<SdkSuccess<T>, SdkError<E>> {
    match parsed {
        Ok(parsed) => Ok(SdkSuccess { raw, parsed }),
        Err(err) => Err(SdkError::ServiceError { raw, err }),
    }
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use crate::middleware::load_response;
    use crate::response::ParseStrictResponse;
    use crate::result::SdkError;
    use bytes::Bytes;

    struct StatusParser;

    impl ParseStrictResponse for StatusParser {
        type Output = Result<String, u16>;

        fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
            if response.status().is_success() {
                Ok(String::from_utf8_lossy(response.body()).to_string())
            } else {
                Err(response.status().as_u16())
            }
        }
    }

    fn response(status: u16, body: &str) -> http::Response<SdkBody> {
        http::Response::builder()
            .status(status)
            .body(SdkBody::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn loads_body_and_parses() {
        let result = load_response(response(200, "hello"), &StatusParser)
            .await
            .expect("success");
        assert_eq!(result.parsed, "hello");
        assert_eq!(result.raw.body().bytes(), Some("hello".as_bytes()));
    }

    #[tokio::test]
    async fn parser_errors_become_service_errors() {
        let err = load_response(response(404, "missing"), &StatusParser)
            .await
            .expect_err("not found");
        match err {
            SdkError::ServiceError { raw, err } => {
                assert_eq!(err, 404);
                assert_eq!(raw.body().bytes(), Some("missing".as_bytes()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreadable_body_is_a_response_error() {
        let err = load_response(
            http::Response::builder()
                .status(200)
                .body(SdkBody::taken())
                .unwrap(),
            &StatusParser,
        )
        .await
        .expect_err("taken body cannot be read");
        assert!(matches!(err, SdkError::ResponseError { .. }));
    }
}
