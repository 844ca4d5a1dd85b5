/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::BoxError;
use hyper::client::{HttpConnector, ResponseFuture};
use hyper_tls::HttpsConnector;
use smithy_http::body::SdkBody;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;

#[cfg(feature = "test-util")]
use crate::test_connection::TestConnection;
#[cfg(feature = "test-util")]
use std::future::Ready;

type BoxFuture = Pin<Box<dyn Future<Output = Result<http::Response<SdkBody>, BoxError>> + Send>>;

/// A good base connection type for most use cases
///
/// This supports three options:
/// 1. HTTPS
/// 2. A `TestConnection`
/// 3. Any implementation of the `HttpService` trait
pub enum Standard {
    Https(hyper::Client<HttpsConnector<HttpConnector>, SdkBody>),
    #[cfg(feature = "test-util")]
    Test(TestConnection<hyper::Body>),
    Dyn(Box<dyn HttpService>),
}

impl Standard {
    /// An HTTPS connector backed by hyper and the platform's native TLS
    pub fn https() -> Self {
        let https = HttpsConnector::new();
        Standard::Https(hyper::Client::builder().build::<_, SdkBody>(https))
    }

    /// Wrap any tower service that maps `http::Request<SdkBody>` to `http::Response<SdkBody>`
    pub fn new<S>(service: S) -> Self
    where
        S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Error: Into<BoxError>,
        S::Future: Send + 'static,
    {
        Standard::Dyn(Box::new(service))
    }
}

impl fmt::Debug for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Standard::Https(_) => "Https",
            #[cfg(feature = "test-util")]
            Standard::Test(_) => "Test",
            Standard::Dyn(_) => "Dyn",
        };
        f.debug_tuple("Standard").field(&kind).finish()
    }
}

impl Clone for Standard {
    fn clone(&self) -> Self {
        match self {
            Standard::Https(client) => Standard::Https(client.clone()),
            #[cfg(feature = "test-util")]
            Standard::Test(test_conn) => Standard::Test(test_conn.clone()),
            Standard::Dyn(box_conn) => Standard::Dyn(box_conn.clone()),
        }
    }
}

#[cfg(feature = "test-util")]
impl From<TestConnection<hyper::Body>> for Standard {
    fn from(conn: TestConnection<hyper::Body>) -> Self {
        Standard::Test(conn)
    }
}

impl Clone for Box<dyn HttpService> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Object-safe HTTP connector
///
/// Implemented for every cloneable tower service with the right request and response types.
pub trait HttpService: Send + Sync {
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>>;
    fn call(&mut self, req: http::Request<SdkBody>) -> BoxFuture;
    fn clone_box(&self) -> Box<dyn HttpService>;
}

impl<S> HttpService for S
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
{
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>> {
        Service::poll_ready(self, cx).map_err(|err| err.into())
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> BoxFuture {
        let fut = Service::call(self, req);
        Box::pin(async move { fut.await.map_err(|err| err.into()) })
    }

    fn clone_box(&self) -> Box<dyn HttpService> {
        Box::new(self.clone())
    }
}

impl Service<http::Request<SdkBody>> for Standard {
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = StandardFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        match self {
            Standard::Https(https) => Service::poll_ready(https, cx).map_err(|err| err.into()),
            #[cfg(feature = "test-util")]
            Standard::Test(_) => Poll::Ready(Ok(())),
            Standard::Dyn(conn) => HttpService::poll_ready(conn.as_mut(), cx),
        }
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> Self::Future {
        match self {
            Standard::Https(https) => StandardFuture::Https(Service::call(https, req)),
            #[cfg(feature = "test-util")]
            Standard::Test(conn) => StandardFuture::TestConn(Service::call(conn, req)),
            Standard::Dyn(conn) => StandardFuture::Dyn(HttpService::call(conn.as_mut(), req)),
        }
    }
}

#[pin_project::pin_project(project = FutProj)]
pub enum StandardFuture {
    Https(#[pin] ResponseFuture),
    #[cfg(feature = "test-util")]
    TestConn(#[pin] Ready<Result<http::Response<SdkBody>, BoxError>>),
    Dyn(#[pin] BoxFuture),
}

impl Future for StandardFuture {
    type Output = Result<http::Response<SdkBody>, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            FutProj::Https(fut) => fut
                .poll(cx)
                .map_ok(|response| response.map(SdkBody::from))
                .map_err(|err| err.into()),
            #[cfg(feature = "test-util")]
            FutProj::TestConn(ready_fut) => ready_fut.poll(cx),
            FutProj::Dyn(dyn_fut) => dyn_fut.poll(cx),
        }
    }
}
