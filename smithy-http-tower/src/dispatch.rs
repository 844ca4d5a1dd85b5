/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::SendOperationError;
use smithy_http::body::SdkBody;
use smithy_http::operation;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{BoxError, Layer, Service};
use tracing::{debug_span, trace, Instrument};

/// Connects Operation driven middleware to an HTTP implementation.
///
/// It will also wrap the error type in OperationError to enable operation middleware
/// reporting specific errors
#[derive(Clone)]
pub struct DispatchService<S> {
    inner: S,
}

type BoxedResultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S> Service<operation::Request> for DispatchService<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = SendOperationError;
    type Future = BoxedResultFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|e| SendOperationError::RequestDispatchError(e.into()))
    }

    fn call(&mut self, req: operation::Request) -> Self::Future {
        let (req, _property_bag) = req.into_parts();
        let span = debug_span!("dispatch", request = ?req);
        let future = self.inner.call(req);
        Box::pin(
            async move {
                let response = future
                    .await
                    .map_err(|e| SendOperationError::RequestDispatchError(e.into()))?;
                trace!(status = %response.status(), "received response");
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[derive(Clone, Default)]
#[non_exhaustive]
pub struct DispatchLayer;

impl DispatchLayer {
    pub fn new() -> Self {
        DispatchLayer
    }
}

impl<S> Layer<S> for DispatchLayer
where
    S: Service<http::Request<SdkBody>>,
{
    type Service = DispatchService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DispatchService { inner }
    }
}

#[cfg(test)]
mod test {
    use crate::dispatch::DispatchLayer;
    use crate::SendOperationError;
    use smithy_http::body::SdkBody;
    use smithy_http::operation;
    use tower::{service_fn, Service, ServiceBuilder, ServiceExt};
    use tracing_test::traced_test;

    #[traced_test]
    #[tokio::test]
    async fn connector_errors_are_dispatch_failures() {
        let conn = service_fn(|_req: http::Request<SdkBody>| async {
            Err::<http::Response<SdkBody>, _>("connection reset")
        });
        let mut svc = ServiceBuilder::new().layer(DispatchLayer::new()).service(conn);
        let err = svc
            .ready()
            .await
            .unwrap()
            .call(operation::Request::new(
                http::Request::builder()
                    .uri("https://example.com/")
                    .body(SdkBody::empty())
                    .unwrap(),
            ))
            .await
            .expect_err("connector fails");
        match err {
            SendOperationError::RequestDispatchError(e) => {
                assert_eq!(format!("{}", e), "connection reset")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn dispatch_is_traced() {
        let conn = service_fn(|_req: http::Request<SdkBody>| async {
            Ok::<_, &'static str>(http::Response::new(SdkBody::empty()))
        });
        let mut svc = ServiceBuilder::new().layer(DispatchLayer::new()).service(conn);
        svc.ready()
            .await
            .unwrap()
            .call(operation::Request::new(http::Request::new(SdkBody::empty())))
            .await
            .expect("success");
        assert!(logs_contain("received response"));
    }
}
