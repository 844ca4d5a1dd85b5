/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Modeled errors and the per-operation error types that wrap them
//!
//! restJson1 names the error in the `x-amzn-errortype` header, falling back to the `__type` or
//! `code` member of the body.

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
    /// The request is not well formed
    BadRequestException,
    None
);
error_shape!(
    /// The resource specified in the request was not found
    NotFoundException,
    None
);
error_shape!(
    /// You are not authorized to perform this operation
    UnauthorizedException,
    None
);
error_shape!(
    /// An internal AWS AppSync error occurred
    InternalFailureException,
    Some(ErrorKind::ServerError)
);

operation_error!(
    /// Error type for the `GetGraphqlApi` operation
    GetGraphqlApiError,
    GetGraphqlApiErrorKind {
        BadRequestException => is_bad_request_exception,
        NotFoundException => is_not_found_exception,
        UnauthorizedException => is_unauthorized_exception,
        InternalFailureException => is_internal_failure_exception,
    }
);
operation_error!(
    /// Error type for the `ListGraphqlApis` operation
    ListGraphqlApisError,
    ListGraphqlApisErrorKind {
        BadRequestException => is_bad_request_exception,
        UnauthorizedException => is_unauthorized_exception,
        InternalFailureException => is_internal_failure_exception,
    }
);
operation_error!(
    /// Error type for the `CreateApiKey` operation
    CreateApiKeyError,
    CreateApiKeyErrorKind {
        BadRequestException => is_bad_request_exception,
        NotFoundException => is_not_found_exception,
        UnauthorizedException => is_unauthorized_exception,
        InternalFailureException => is_internal_failure_exception,
    }
);
operation_error!(
    /// Error type for the `DeleteGraphqlApi` operation
    DeleteGraphqlApiError,
    DeleteGraphqlApiErrorKind {
        BadRequestException => is_bad_request_exception,
        NotFoundException => is_not_found_exception,
        UnauthorizedException => is_unauthorized_exception,
        InternalFailureException => is_internal_failure_exception,
    }
);
