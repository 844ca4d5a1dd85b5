/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! The outermost per-attempt service: splits an [`Operation`] into its request and response
//! handler, sends the request and parses whatever comes back.

use crate::SendOperationError;
use smithy_http::body::SdkBody;
use smithy_http::middleware::load_response;
use smithy_http::operation;
use smithy_http::operation::Operation;
use smithy_http::response::ParseHttpResponse;
use smithy_http::result::{SdkError, SdkSuccess};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug_span, Instrument};

/// Turns a service over [`operation::Request`] into a service over [`Operation`]
///
/// `O` is the response handler and `R` the retry policy of the operations it accepts.
#[derive(Clone)]
pub struct ParseResponseService<S, O, R> {
    inner: S,
    _operation: PhantomData<fn(O, R)>,
}

#[derive(Default)]
pub struct ParseResponseLayer<O, R> {
    _operation: PhantomData<fn(O, R)>,
}

impl<O, R> ParseResponseLayer<O, R> {
    pub fn new() -> Self {
        ParseResponseLayer {
            _operation: PhantomData,
        }
    }
}

impl<S, O, R> Layer<S> for ParseResponseLayer<O, R>
where
    S: Service<operation::Request>,
{
    type Service = ParseResponseService<S, O, R>;

    fn layer(&self, inner: S) -> Self::Service {
        ParseResponseService {
            inner,
            _operation: PhantomData,
        }
    }
}

type ParseFuture<T, E> = Pin<Box<dyn Future<Output = Result<SdkSuccess<T>, SdkError<E>>> + Send>>;

impl<S, O, T, E, R> Service<Operation<O, R>> for ParseResponseService<S, O, R>
where
    S: Service<operation::Request, Response = http::Response<SdkBody>, Error = SendOperationError>,
    S::Future: Send + 'static,
    O: ParseHttpResponse<SdkBody, Output = Result<T, E>> + Send + Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Response = SdkSuccess<T>;
    type Error = SdkError<E>;
    type Future = ParseFuture<T, E>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(SdkError::from)
    }

    fn call(&mut self, op: Operation<O, R>) -> Self::Future {
        let (request, parts) = op.into_request_response();
        let span = match &parts.metadata {
            Some(metadata) => debug_span!("load_response", operation = metadata.name()),
            None => debug_span!("load_response"),
        };
        let handler = parts.response_handler;
        let sent = self.inner.call(request);
        Box::pin(async move {
            let response = sent.await.map_err(SdkError::from)?;
            load_response(response, &handler).instrument(span).await
        })
    }
}
