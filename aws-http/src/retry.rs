/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Classification of failed attempts for AWS services

use http::HeaderMap;
use smithy_http::body::SdkBody;
use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http::retry::ClassifyResponse;
use smithy_types::retry::{ErrorKind, ProvideErrorKind, RetryKind};
use std::time::Duration;

const RETRY_AFTER: &str = "x-amz-retry-after";

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "TransactionInProgressException",
    "RequestLimitExceeded",
    "BandwidthLimitExceeded",
    "LimitExceededException",
    "RequestThrottled",
    "SlowDown",
    "PriorRequestNotComplete",
    "EC2ThrottledException",
];

const TIMEOUT_CODES: &[&str] = &["RequestTimeout", "RequestTimeoutException"];

/// Retry policy attached to every AWS operation
///
/// A service error is checked against, in order:
/// 1. a `x-amz-retry-after` header holding a delay in milliseconds
/// 2. the retry kind modeled on the error itself
/// 3. well known throttling and timeout error codes
/// 4. HTTP 500, 502, 503 and 504
///
/// Errors raised before a response arrived, or while reading it, are transient. Requests that
/// could not be built are never retried.
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct AwsErrorRetryPolicy;

impl AwsErrorRetryPolicy {
    pub fn new() -> Self {
        AwsErrorRetryPolicy
    }
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let millis = headers.get(RETRY_AFTER)?.to_str().ok()?.parse::<u64>().ok()?;
    Some(Duration::from_millis(millis))
}

fn kind_for_code(code: &str) -> Option<ErrorKind> {
    if THROTTLING_CODES.contains(&code) {
        Some(ErrorKind::ThrottlingError)
    } else if TIMEOUT_CODES.contains(&code) {
        Some(ErrorKind::TransientError)
    } else {
        None
    }
}

fn kind_for_status(status: http::StatusCode) -> Option<ErrorKind> {
    match status.as_u16() {
        500 | 502 | 503 | 504 => Some(ErrorKind::TransientError),
        _ => None,
    }
}

fn classify_service_error<E: ProvideErrorKind>(
    err: &E,
    raw: &http::Response<SdkBody>,
) -> RetryKind {
    if let Some(delay) = retry_after(raw.headers()) {
        return RetryKind::Explicit(delay);
    }
    err.retryable_error_kind()
        .or_else(|| err.code().and_then(kind_for_code))
        .or_else(|| kind_for_status(raw.status()))
        .map(RetryKind::Error)
        .unwrap_or(RetryKind::NotRetryable)
}

impl<T, E> ClassifyResponse<SdkSuccess<T>, SdkError<E>> for AwsErrorRetryPolicy
where
    E: ProvideErrorKind,
{
    fn classify(&self, response: Result<&SdkSuccess<T>, &SdkError<E>>) -> RetryKind {
        match response {
            Ok(_) => RetryKind::Unnecessary,
            Err(SdkError::ServiceError { err, raw }) => classify_service_error(err, raw),
            Err(SdkError::DispatchFailure(_)) | Err(SdkError::ResponseError { .. }) => {
                RetryKind::Error(ErrorKind::TransientError)
            }
            Err(SdkError::ConstructionFailure(_)) => RetryKind::NotRetryable,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::retry::AwsErrorRetryPolicy;
    use smithy_http::body::SdkBody;
    use smithy_http::result::{SdkError, SdkSuccess};
    use smithy_http::retry::ClassifyResponse;
    use smithy_types::retry::{ErrorKind, ProvideErrorKind, RetryKind};
    use std::time::Duration;

    /// An error with a fixed modeled kind and code
    #[derive(Debug, Default)]
    struct TestError {
        kind: Option<ErrorKind>,
        code: Option<&'static str>,
    }

    impl TestError {
        fn coded(code: &'static str) -> Self {
            TestError {
                code: Some(code),
                ..Default::default()
            }
        }
    }

    impl ProvideErrorKind for TestError {
        fn retryable_error_kind(&self) -> Option<ErrorKind> {
            self.kind
        }

        fn code(&self) -> Option<&str> {
            self.code
        }
    }

    fn service_error<E>(err: E, status: u16) -> SdkError<E> {
        SdkError::ServiceError {
            err,
            raw: http::Response::builder()
                .status(status)
                .body(SdkBody::from("{}"))
                .unwrap(),
        }
    }

    fn classify<E: ProvideErrorKind>(err: &SdkError<E>) -> RetryKind {
        ClassifyResponse::<SdkSuccess<()>, SdkError<E>>::classify(
            &AwsErrorRetryPolicy::new(),
            Err(err),
        )
    }

    #[test]
    fn success_needs_no_retry() {
        let success = SdkSuccess {
            raw: http::Response::new(SdkBody::from("{}")),
            parsed: (),
        };
        assert_eq!(
            ClassifyResponse::<SdkSuccess<()>, SdkError<TestError>>::classify(
                &AwsErrorRetryPolicy::new(),
                Ok(&success)
            ),
            RetryKind::Unnecessary
        );
    }

    #[test]
    fn server_statuses_are_transient() {
        for status in [500, 502, 503, 504] {
            assert_eq!(
                classify(&service_error(TestError::default(), status)),
                RetryKind::Error(ErrorKind::TransientError),
                "status {}",
                status
            );
        }
        assert_eq!(
            classify(&service_error(TestError::default(), 501)),
            RetryKind::NotRetryable
        );
        assert_eq!(
            classify(&service_error(TestError::default(), 400)),
            RetryKind::NotRetryable
        );
    }

    #[test]
    fn known_codes() {
        assert_eq!(
            classify(&service_error(TestError::coded("ThrottlingException"), 400)),
            RetryKind::Error(ErrorKind::ThrottlingError)
        );
        assert_eq!(
            classify(&service_error(TestError::coded("RequestTimeout"), 400)),
            RetryKind::Error(ErrorKind::TransientError)
        );
        assert_eq!(
            classify(&service_error(TestError::coded("PipelineNotFoundException"), 400)),
            RetryKind::NotRetryable
        );
    }

    #[test]
    fn generic_errors_are_classified_by_code() {
        let err = smithy_types::Error::builder().code("SlowDown").build();
        assert_eq!(
            classify(&service_error(err, 400)),
            RetryKind::Error(ErrorKind::ThrottlingError)
        );
    }

    #[test]
    fn modeled_kind_wins_over_code_and_status() {
        let err = TestError {
            kind: Some(ErrorKind::ClientError),
            code: Some("Throttling"),
        };
        assert_eq!(
            classify(&service_error(err, 503)),
            RetryKind::Error(ErrorKind::ClientError)
        );
    }

    #[test]
    fn retry_after_header_wins() {
        let err = SdkError::ServiceError {
            err: TestError::coded("Throttling"),
            raw: http::Response::builder()
                .status(503)
                .header("x-amz-retry-after", "5000")
                .body(SdkBody::from("{}"))
                .unwrap(),
        };
        assert_eq!(
            classify(&err),
            RetryKind::Explicit(Duration::from_millis(5000))
        );
    }

    #[test]
    fn failures_without_a_response() {
        let err: SdkError<TestError> = SdkError::DispatchFailure("connection reset".into());
        assert_eq!(classify(&err), RetryKind::Error(ErrorKind::TransientError));

        let err: SdkError<TestError> = SdkError::ConstructionFailure("bad input".into());
        assert_eq!(classify(&err), RetryKind::NotRetryable);
    }
}
