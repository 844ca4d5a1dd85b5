/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::signer::{
    OperationSigningConfig, RequestConfig, SigV4Signer, SignableBody, SigningError,
    SigningRequirements,
};
use aws_auth::Credentials;
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::property_bag::PropertyBag;
use std::time::SystemTime;
use thiserror::Error;

/// Middleware stage to sign requests with SigV4
///
/// SigV4SigningStage will load configuration from the request property bag and add
/// a signature.
///
/// Prior to signing, the following fields MUST be present in the property bag:
/// - [`SigningRegion`](SigningRegion): The region used when signing the request, eg. `us-east-1`
/// - [`SigningService`](SigningService): The name of the service to use when signing the request, eg. `datapipeline`
/// - [`Credentials`](Credentials): Credentials to sign with, placed there by the credentials stage
/// - [`OperationSigningConfig`](OperationSigningConfig): Operation specific signing configuration, eg.
///   changes to URL encoding behavior, or headers that must be omitted.
/// If any of these fields are missing, the middleware will return an error.
///
/// The following fields MAY be present in the property bag:
/// - [`SystemTime`](SystemTime): The timestamp to use when signing the request. If this field is not present
///   [`SystemTime::now`](SystemTime::now) will be used.
#[derive(Clone, Debug)]
pub struct SigV4SigningStage {
    signer: SigV4Signer,
}

impl SigV4SigningStage {
    pub fn new(signer: SigV4Signer) -> Self {
        Self { signer }
    }
}

#[derive(Debug, Error)]
pub enum SigningStageError {
    #[error("No credentials in the property bag")]
    MissingCredentials,
    #[error("No signing region in the property bag")]
    MissingSigningRegion,
    #[error("No signing service in the property bag")]
    MissingSigningService,
    #[error("No signing configuration in the property bag")]
    MissingSigningConfig,
    #[error("Signing failed")]
    SigningFailure(#[from] SigningError),
}

/// Extract a signing config from a [`PropertyBag`](smithy_http::property_bag::PropertyBag)
///
/// Returns `Ok(None)` when the operation should be sent unsigned.
fn signing_config(
    config: &PropertyBag,
) -> Result<Option<(&OperationSigningConfig, RequestConfig<'_>, &Credentials)>, SigningStageError>
{
    let operation_config = config
        .get::<OperationSigningConfig>()
        .ok_or(SigningStageError::MissingSigningConfig)?;
    let credentials = match (operation_config.signing_requirements, config.get::<Credentials>()) {
        (SigningRequirements::Disabled, _) => return Ok(None),
        (SigningRequirements::Optional, None) => return Ok(None),
        (SigningRequirements::Required, None) => {
            return Err(SigningStageError::MissingCredentials)
        }
        (_, Some(credentials)) => credentials,
    };
    let region = config
        .get::<SigningRegion>()
        .ok_or(SigningStageError::MissingSigningRegion)?;
    let signing_service = config
        .get::<SigningService>()
        .ok_or(SigningStageError::MissingSigningService)?;
    let request_config = RequestConfig {
        request_ts: config
            .get::<SystemTime>()
            .copied()
            .unwrap_or_else(SystemTime::now),
        region,
        service: signing_service,
        payload_override: None,
    };
    Ok(Some((operation_config, request_config, credentials)))
}

static UNSIGNED_PAYLOAD: SignableBody<'static> = SignableBody::UnsignedPayload;

impl MapRequest for SigV4SigningStage {
    type Error = SigningStageError;

    fn name(&self) -> &'static str {
        "sigv4_sign"
    }

    fn apply(&self, req: Request) -> Result<Request, Self::Error> {
        req.augment(|req, config| {
            let (operation_config, mut request_config, credentials) =
                match signing_config(config)? {
                    Some(signing_config) => signing_config,
                    None => {
                        tracing::debug!("signing disabled for this request");
                        return Ok(req);
                    }
                };

            // In-memory bodies are hashed directly. Streaming bodies are signed with
            // UNSIGNED-PAYLOAD.
            let (parts, body) = req.into_parts();
            let signable_body = match body.bytes() {
                Some(bytes) => bytes,
                None => {
                    request_config.payload_override = Some(&UNSIGNED_PAYLOAD);
                    &[]
                }
            };
            let mut signable_request = http::Request::from_parts(parts, signable_body);

            self.signer.sign(
                operation_config,
                &request_config,
                credentials,
                &mut signable_request,
            )?;
            let (signed_parts, _) = signable_request.into_parts();
            Ok(http::Request::from_parts(signed_parts, body))
        })
    }
}
