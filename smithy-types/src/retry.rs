/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Retry classification shared between service errors and the client's retry strategy

use std::fmt;
use std::time::Duration;

/// Why a failed call may be worth another attempt
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// The request may never have reached the service: connect failures, timeouts, a response
    /// that could not be read.
    TransientError,

    /// The service asked the caller to slow down.
    ThrottlingError,

    /// The service failed in a way that a later attempt may not, eg. `InternalServiceError`.
    ServerError,

    /// The caller must change the request before it can succeed.
    ClientError,
}

impl ErrorKind {
    /// Transient errors cost more of the retry quota than the other kinds
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::TransientError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::TransientError => "transient error",
            ErrorKind::ThrottlingError => "throttling error",
            ErrorKind::ServerError => "server error",
            ErrorKind::ClientError => "client error",
        })
    }
}

/// Implemented by every operation error so the retry policy can classify it
pub trait ProvideErrorKind {
    /// The kind of a modeled retryable error
    ///
    /// `None` leaves the decision to the error code and HTTP status.
    fn retryable_error_kind(&self) -> Option<ErrorKind>;

    /// The error code reported by the service, eg. `PipelineNotFoundException`
    fn code(&self) -> Option<&str>;
}

/// Outcome of classifying one attempt
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RetryKind {
    Error(ErrorKind),

    /// The service asked for a retry after a delay (`x-amz-retry-after`)
    ///
    /// The delay still counts against the attempt limit.
    Explicit(Duration),

    NotRetryable,

    /// The attempt succeeded
    Unnecessary,
}

impl RetryKind {
    /// Whether another attempt should be considered at all
    pub fn should_retry(&self) -> bool {
        matches!(self, RetryKind::Error(_) | RetryKind::Explicit(_))
    }
}

#[cfg(test)]
mod test {
    use crate::retry::{ErrorKind, RetryKind};
    use std::time::Duration;

    #[test]
    fn only_errors_and_explicit_delays_retry() {
        assert!(RetryKind::Error(ErrorKind::ThrottlingError).should_retry());
        assert!(RetryKind::Explicit(Duration::from_millis(100)).should_retry());
        assert!(!RetryKind::NotRetryable.should_retry());
        assert!(!RetryKind::Unnecessary.should_retry());
    }

    #[test]
    fn transient_errors() {
        assert!(ErrorKind::TransientError.is_transient());
        assert!(!ErrorKind::ServerError.is_transient());
        assert_eq!(ErrorKind::ThrottlingError.to_string(), "throttling error");
    }
}
