/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! SigV4 for `http` requests
//!
//! [`sign`] never mutates the request. It returns [`SigningInstructions`]: the headers (or query
//! parameters, for presigned URLs) the caller must add before sending. Where the signature goes
//! and how the path is encoded are controlled by [`SigningSettings`].

mod canonical_request;
mod error;
mod settings;
mod sign;
mod url_escape;

pub use error::SigningError;
pub use settings::{PayloadChecksumKind, SignatureLocation, SigningSettings, UriEncoding};
pub use sign::{sign, SignableBody, SignableRequest, SigningInstructions};

/// Signing parameters for HTTP requests
pub type SigningParams<'a> = crate::SigningParams<'a, SigningSettings>;
