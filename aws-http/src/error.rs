/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Generic error parsing for the AWS JSON protocols (awsJson1.x and restJson1)

use serde_json::{Map, Value};
use smithy_types::Error as GenericError;

const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const REQUEST_ID_HEADERS: &[&str] = &["x-amzn-requestid", "x-amz-request-id"];
const CODE_FIELDS: &[&str] = &["__type", "code"];
const MESSAGE_FIELDS: &[&str] = &["message", "Message", "errorMessage"];

/// Error codes may be namespaced (`aws.datapipeline#PipelineNotFoundException`) and may carry
/// a trailing URI (`PipelineNotFoundException:http://internal.amazon.com/...`). Only the bare
/// shape name is kept.
pub fn sanitize_error_code(error_code: &str) -> &str {
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };
    match error_code.rfind('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

fn string_field<'a>(object: Option<&'a Map<String, Value>>, fields: &[&str]) -> Option<&'a str> {
    let object = object?;
    fields
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_str))
}

/// Parse the generic error (code, message, request id) out of an AWS JSON error response
///
/// The code comes from the `x-amzn-errortype` header when present, otherwise from the
/// `__type` or `code` fields of the body. A body that is not a JSON object still yields an
/// error; its code and message are simply absent.
pub fn parse_generic_error<B: AsRef<[u8]>>(response: &http::Response<B>) -> GenericError {
    let body: Option<Value> = serde_json::from_slice(response.body().as_ref()).ok();
    let object = body.as_ref().and_then(Value::as_object);
    let headers = response.headers();

    let code = headers
        .get(ERROR_TYPE_HEADER)
        .and_then(|value| value.to_str().ok())
        .or_else(|| string_field(object, CODE_FIELDS))
        .map(sanitize_error_code);
    let message = string_field(object, MESSAGE_FIELDS);
    let request_id = REQUEST_ID_HEADERS.iter().find_map(|header| {
        headers
            .get(*header)
            .and_then(|value| value.to_str().ok())
    });

    let mut builder = GenericError::builder();
    if let Some(code) = code {
        builder.code(code);
    }
    if let Some(message) = message {
        builder.message(message);
    }
    if let Some(request_id) = request_id {
        builder.request_id(request_id);
    }
    builder.build()
}

#[cfg(test)]
mod test {
    use crate::error::{parse_generic_error, sanitize_error_code};
    use bytes::Bytes;
    use smithy_types::Error;

    #[test]
    fn generic_error_from_body() {
        let response = http::Response::builder()
            .header("X-Amzn-Requestid", "1234")
            .body(Bytes::from_static(
                br#"{ "__type": "FooError", "message": "Go to foo" }"#,
            ))
            .unwrap();
        assert_eq!(
            parse_generic_error(&response),
            Error::builder()
                .code("FooError")
                .message("Go to foo")
                .request_id("1234")
                .build()
        )
    }

    #[test]
    fn header_takes_precedence_over_body() {
        let response = http::Response::builder()
            .header("x-amzn-errortype", "NotFoundException:http://internal.amazon.com/coral/")
            .header("x-amz-request-id", "abcd")
            .body(r#"{"code": "Ignored", "errorMessage": "no such api"}"#)
            .unwrap();
        let err = parse_generic_error(&response);
        assert_eq!(Some("NotFoundException"), err.code());
        assert_eq!(Some("no such api"), err.message());
        assert_eq!(Some("abcd"), err.request_id());
    }

    #[test]
    fn malformed_body_yields_empty_error() {
        let response = http::Response::builder()
            .status(500)
            .body("<html>bad gateway</html>")
            .unwrap();
        assert_eq!(parse_generic_error(&response), Error::builder().build());
    }

    #[test]
    fn sanitize_namespace_and_uri() {
        assert_eq!(sanitize_error_code("aws.protocoltests.restjson#FooError"), "FooError");
        assert_eq!(
            sanitize_error_code("FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/"),
            "FooError"
        );
        assert_eq!(
            sanitize_error_code("aws.protocoltests.restjson#FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/"),
            "FooError"
        );
        assert_eq!(sanitize_error_code("FooError"), "FooError");
    }
}
