/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::header::InvalidHeaderValue;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
enum SigningErrorKind {
    MissingAuthority,
    InvalidHeaderValue(InvalidHeaderValue),
    InvalidUri(http::uri::InvalidUri),
    InvalidUriParts(http::uri::InvalidUriParts),
}

/// Error signing an HTTP request
#[derive(Debug)]
pub struct SigningError {
    kind: SigningErrorKind,
}

impl SigningError {
    pub(crate) fn missing_authority() -> Self {
        Self {
            kind: SigningErrorKind::MissingAuthority,
        }
    }
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SigningErrorKind::MissingAuthority => {
                write!(f, "request URI must have an authority to be signed")
            }
            SigningErrorKind::InvalidHeaderValue(_) => {
                write!(f, "signing produced an invalid header value")
            }
            SigningErrorKind::InvalidUri(_) | SigningErrorKind::InvalidUriParts(_) => {
                write!(f, "signing produced an invalid URI")
            }
        }
    }
}

impl Error for SigningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            SigningErrorKind::MissingAuthority => None,
            SigningErrorKind::InvalidHeaderValue(err) => Some(err),
            SigningErrorKind::InvalidUri(err) => Some(err),
            SigningErrorKind::InvalidUriParts(err) => Some(err),
        }
    }
}

impl From<InvalidHeaderValue> for SigningError {
    fn from(err: InvalidHeaderValue) -> Self {
        Self {
            kind: SigningErrorKind::InvalidHeaderValue(err),
        }
    }
}

impl From<http::uri::InvalidUri> for SigningError {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self {
            kind: SigningErrorKind::InvalidUri(err),
        }
    }
}

impl From<http::uri::InvalidUriParts> for SigningError {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self {
            kind: SigningErrorKind::InvalidUriParts(err),
        }
    }
}
