/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::body::SdkBody;
use crate::endpoint::ResolveEndpointError;
use crate::operation::BuildError;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

type BoxError = Box<dyn Error + Send + Sync>;

/// Successful SDK Result
#[derive(Debug)]
pub struct SdkSuccess<O> {
    pub raw: http::Response<SdkBody>,
    pub parsed: O,
}

/// Failed SDK Result
#[derive(Debug)]
pub enum SdkError<E> {
    /// The request failed during construction. It was not dispatched over the network.
    ConstructionFailure(BoxError),

    /// The request failed during dispatch. An HTTP response was not received. The request MAY
    /// have been sent.
    DispatchFailure(BoxError),

    /// A response was received but it was not parseable according the the protocol (for example
    /// the server hung up while the body was being read)
    ResponseError {
        raw: http::Response<SdkBody>,
        err: BoxError,
    },

    /// An error response was received from the service
    ServiceError {
        raw: http::Response<SdkBody>,
        err: E,
    },
}

/// Coarse classification of an [`SdkError`].
///
/// `MissingParameter` and `EndpointResolution` are both construction failures; they are split
/// out so callers can branch on them without downcasting the boxed source.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// A required input field was not set
    MissingParameter,
    /// No endpoint could be resolved for the request
    EndpointResolution,
    /// Any other failure while building the request
    Construction,
    Dispatch,
    Response,
    Service,
}

impl<E> SdkError<E> {
    pub fn kind(&self) -> FailureKind {
        match self {
            SdkError::ConstructionFailure(err) => {
                if let Some(BuildError::MissingField { .. }) = err.downcast_ref::<BuildError>() {
                    FailureKind::MissingParameter
                } else if err.downcast_ref::<ResolveEndpointError>().is_some() {
                    FailureKind::EndpointResolution
                } else {
                    FailureKind::Construction
                }
            }
            SdkError::DispatchFailure(_) => FailureKind::Dispatch,
            SdkError::ResponseError { .. } => FailureKind::Response,
            SdkError::ServiceError { .. } => FailureKind::Service,
        }
    }

    /// The modeled service error, if this failure is a service error
    pub fn service_error(&self) -> Option<&E> {
        match self {
            SdkError::ServiceError { err, .. } => Some(err),
            _ => None,
        }
    }

    /// The raw HTTP response, if one was received
    pub fn raw_response(&self) -> Option<&http::Response<SdkBody>> {
        match self {
            SdkError::ResponseError { raw, .. } | SdkError::ServiceError { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl<E> Display for SdkError<E>
where
    E: Error,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SdkError::ConstructionFailure(err) => write!(f, "failed to construct request: {}", err),
            SdkError::DispatchFailure(err) => write!(f, "dispatch failure: {}", err),
            SdkError::ResponseError { err, .. } => write!(f, "response error: {}", err),
            SdkError::ServiceError { err, .. } => write!(f, "service error: {}", err),
        }
    }
}

impl<E> Error for SdkError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SdkError::ConstructionFailure(err)
            | SdkError::DispatchFailure(err)
            | SdkError::ResponseError { err, .. } => Some(err.as_ref()),
            SdkError::ServiceError { err, .. } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::body::SdkBody;
    use crate::endpoint::ResolveEndpointError;
    use crate::operation::BuildError;
    use crate::result::{FailureKind, SdkError};
    use std::fmt;

    #[derive(Debug)]
    struct ModeledError;

    impl fmt::Display for ModeledError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "modeled")
        }
    }

    impl std::error::Error for ModeledError {}

    #[test]
    fn construction_failures_are_classified() {
        let missing: SdkError<ModeledError> = SdkError::ConstructionFailure(
            BuildError::missing_field("pipelineId", "pipelineId is required").into(),
        );
        assert_eq!(missing.kind(), FailureKind::MissingParameter);

        let endpoint: SdkError<ModeledError> =
            SdkError::ConstructionFailure(ResolveEndpointError::message("no region").into());
        assert_eq!(endpoint.kind(), FailureKind::EndpointResolution);

        let other: SdkError<ModeledError> = SdkError::ConstructionFailure(
            BuildError::InvalidField {
                field: "apiId",
                details: "must not be empty".into(),
            }
            .into(),
        );
        assert_eq!(other.kind(), FailureKind::Construction);
    }

    #[test]
    fn service_errors_expose_the_response() {
        let err = SdkError::ServiceError {
            raw: http::Response::builder()
                .status(400)
                .body(SdkBody::empty())
                .unwrap(),
            err: ModeledError,
        };
        assert_eq!(err.kind(), FailureKind::Service);
        assert!(err.service_error().is_some());
        assert_eq!(err.raw_response().map(|r| r.status().as_u16()), Some(400));
        assert_eq!(format!("{}", err), "service error: modeled");
    }
}
