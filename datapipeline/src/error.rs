/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Modeled errors and the per-operation error types that wrap them
//!
//! Every operation error carries the generic [`smithy_types::Error`] (code, message and request id)
//! next to a `kind` naming the modeled error. Error codes the operation does not model end up in
//! the `Unhandled` variant with the generic error still available.

use smithy_types::retry::{ErrorKind, ProvideErrorKind};
use smithy_types::Error as GenericError;
use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

macro_rules! error_shape {
    ($(#[$meta:meta])* $name:ident, $retry:expr) => {
        $(#[$meta])*
        #[non_exhaustive]
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            pub message: Option<String>,
        }

        impl $name {
            const RETRYABLE: Option<ErrorKind> = $retry;

            pub fn message(&self) -> Option<&str> {
                self.message.as_deref()
            }

            fn from_generic(generic: &GenericError) -> Self {
                $name {
                    message: generic.message().map(str::to_owned),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", stringify!($name))?;
                if let Some(message) = &self.message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
        }

        impl std::error::Error for $name {}
    };
}

macro_rules! operation_error {
    ($(#[$meta:meta])* $error:ident, $kind:ident { $($variant:ident => $is_variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $error {
            pub kind: $kind,
            pub(crate) meta: GenericError,
        }

        #[non_exhaustive]
        #[derive(Debug)]
        pub enum $kind {
            $($variant($variant),)+
            /// An unexpected error, eg. invalid JSON returned by the service or an unknown error code
            Unhandled(BoxError),
        }

        impl fmt::Display for $error {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match &self.kind {
                    $($kind::$variant(inner) => write!(f, "{}", inner),)+
                    $kind::Unhandled(inner) => write!(f, "{}", inner),
                }
            }
        }

        impl ProvideErrorKind for $error {
            fn retryable_error_kind(&self) -> Option<ErrorKind> {
                match &self.kind {
                    $($kind::$variant(_) => $variant::RETRYABLE,)+
                    $kind::Unhandled(_) => None,
                }
            }

            fn code(&self) -> Option<&str> {
                $error::code(self)
            }
        }

        impl $error {
            pub fn new(kind: $kind, meta: GenericError) -> Self {
                Self { kind, meta }
            }

            pub fn unhandled(err: impl Into<BoxError>) -> Self {
                Self {
                    kind: $kind::Unhandled(err.into()),
                    meta: Default::default(),
                }
            }

            pub fn generic(err: GenericError) -> Self {
                Self {
                    meta: err.clone(),
                    kind: $kind::Unhandled(err.into()),
                }
            }

            pub fn message(&self) -> Option<&str> {
                self.meta.message()
            }

            pub fn meta(&self) -> &GenericError {
                &self.meta
            }

            pub fn request_id(&self) -> Option<&str> {
                self.meta.request_id()
            }

            pub fn code(&self) -> Option<&str> {
                self.meta.code()
            }

            $(
                pub fn $is_variant(&self) -> bool {
                    matches!(&self.kind, $kind::$variant(_))
                }
            )+

            pub(crate) fn from_generic_error(generic: GenericError) -> Self {
                let kind = match generic.code() {
                    $(Some(code) if code == stringify!($variant) => {
                        $kind::$variant($variant::from_generic(&generic))
                    })+
                    _ => return Self::generic(generic),
                };
                Self::new(kind, generic)
            }
        }

        impl std::error::Error for $error {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                match &self.kind {
                    $($kind::$variant(inner) => Some(inner),)+
                    $kind::Unhandled(inner) => Some(inner.as_ref()),
                }
            }
        }
    };
}

error_shape!(
    /// An internal service error occurred
    InternalServiceError,
    Some(ErrorKind::ServerError)
);
error_shape!(
    /// The request was not valid. Verify that your request was properly formatted, that the
    /// signature was generated with the correct credentials, and that you haven't exceeded any
    /// of the service limits for your account.
    InvalidRequestException,
    None
);
error_shape!(
    /// The specified pipeline was not found
    PipelineNotFoundException,
    None
);
error_shape!(
    /// The specified pipeline has been deleted
    PipelineDeletedException,
    None
);

operation_error!(
    /// Error type for the `CreatePipeline` operation
    CreatePipelineError,
    CreatePipelineErrorKind {
        InternalServiceError => is_internal_service_error,
        InvalidRequestException => is_invalid_request_exception,
    }
);
operation_error!(
    /// Error type for the `ActivatePipeline` operation
    ActivatePipelineError,
    ActivatePipelineErrorKind {
        InternalServiceError => is_internal_service_error,
        InvalidRequestException => is_invalid_request_exception,
        PipelineDeletedException => is_pipeline_deleted_exception,
        PipelineNotFoundException => is_pipeline_not_found_exception,
    }
);
operation_error!(
    /// Error type for the `DeletePipeline` operation
    DeletePipelineError,
    DeletePipelineErrorKind {
        InternalServiceError => is_internal_service_error,
        InvalidRequestException => is_invalid_request_exception,
        PipelineNotFoundException => is_pipeline_not_found_exception,
    }
);
operation_error!(
    /// Error type for the `DescribePipelines` operation
    DescribePipelinesError,
    DescribePipelinesErrorKind {
        InternalServiceError => is_internal_service_error,
        InvalidRequestException => is_invalid_request_exception,
        PipelineDeletedException => is_pipeline_deleted_exception,
        PipelineNotFoundException => is_pipeline_not_found_exception,
    }
);
operation_error!(
    /// Error type for the `ListPipelines` operation
    ListPipelinesError,
    ListPipelinesErrorKind {
        InternalServiceError => is_internal_service_error,
        InvalidRequestException => is_invalid_request_exception,
    }
);

#[cfg(test)]
mod test {
    use crate::error::{ActivatePipelineError, ActivatePipelineErrorKind, ListPipelinesError};
    use smithy_types::retry::{ErrorKind, ProvideErrorKind};
    use smithy_types::Error as GenericError;

    fn generic(code: &str) -> GenericError {
        GenericError::builder()
            .code(code)
            .message("it broke")
            .request_id("req-1")
            .build()
    }

    #[test]
    fn modeled_codes_select_a_variant() {
        let err = ActivatePipelineError::from_generic_error(generic("PipelineNotFoundException"));
        assert!(err.is_pipeline_not_found_exception());
        assert!(!err.is_pipeline_deleted_exception());
        assert_eq!(err.code(), Some("PipelineNotFoundException"));
        assert_eq!(err.message(), Some("it broke"));
        assert_eq!(err.request_id(), Some("req-1"));
        assert_eq!(err.retryable_error_kind(), None);
        assert_eq!(
            err.to_string(),
            "PipelineNotFoundException: it broke"
        );
    }

    #[test]
    fn internal_errors_are_server_errors() {
        let err = ListPipelinesError::from_generic_error(generic("InternalServiceError"));
        assert!(err.is_internal_service_error());
        assert_eq!(err.retryable_error_kind(), Some(ErrorKind::ServerError));
    }

    #[test]
    fn unknown_codes_are_unhandled() {
        let err = ActivatePipelineError::from_generic_error(generic("SomethingNew"));
        assert!(matches!(err.kind, ActivatePipelineErrorKind::Unhandled(_)));
        assert_eq!(ProvideErrorKind::code(&err), Some("SomethingNew"));
        assert_eq!(err.message(), Some("it broke"));
    }

    #[test]
    fn unhandled_errors_have_no_metadata() {
        let err = ListPipelinesError::unhandled("bad json");
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "bad json");
    }
}
