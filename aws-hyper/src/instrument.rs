/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Client side metrics and the tower services that record them

use crate::BoxError;
use pin_project::pin_project;
use smithy_http::body::SdkBody;
use smithy_observability::attributes::Attributes;
use smithy_observability::meter::{AsyncMeasurement, Histogram, MonotonicCounter};
use smithy_observability::provider::TelemetryProvider;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{debug_span, Instrument};

const SCOPE: &str = "aws-hyper";

pub(crate) const CALL_DURATION: &str = "smithy.client.call.duration";
pub(crate) const RESOLVE_ENDPOINT_DURATION: &str = "smithy.client.call.resolve_endpoint_duration";
pub(crate) const TRANSMIT_DURATION: &str = "smithy.client.call.transmit_duration";
pub(crate) const ATTEMPTS: &str = "smithy.client.call.attempts";
pub(crate) const ERRORS: &str = "smithy.client.call.errors";
pub(crate) const IN_FLIGHT: &str = "smithy.client.call.in_flight";

/// Instruments shared by every call made through one client
pub(crate) struct ClientMetrics {
    call_duration: Box<dyn Histogram>,
    resolve_endpoint_duration: Box<dyn Histogram>,
    transmit_duration: Box<dyn Histogram>,
    attempts: Box<dyn MonotonicCounter>,
    errors: Box<dyn MonotonicCounter>,
    in_flight: Arc<AtomicUsize>,
    in_flight_gauge: Box<dyn AsyncMeasurement<Value = f64>>,
}

impl fmt::Debug for ClientMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientMetrics")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish()
    }
}

impl ClientMetrics {
    pub(crate) fn new(telemetry: &TelemetryProvider) -> Self {
        let meter = telemetry.meter(SCOPE);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let gauge_source = in_flight.clone();
        let in_flight_gauge = meter.create_gauge(
            IN_FLIGHT.to_string(),
            Box::new(move |measurement| {
                measurement.record(gauge_source.load(Ordering::Relaxed) as f64, None)
            }),
            None,
            Some("The number of calls currently in flight".to_string()),
        );
        let seconds = || Some("s".to_string());
        ClientMetrics {
            call_duration: meter.create_histogram(
                CALL_DURATION.to_string(),
                seconds(),
                Some("Overall call duration including retries".to_string()),
            ),
            resolve_endpoint_duration: meter.create_histogram(
                RESOLVE_ENDPOINT_DURATION.to_string(),
                seconds(),
                Some("The time it takes to resolve an endpoint for a request".to_string()),
            ),
            transmit_duration: meter.create_histogram(
                TRANSMIT_DURATION.to_string(),
                seconds(),
                Some("The time from sending a request to receiving its response".to_string()),
            ),
            attempts: meter.create_monotonic_counter(
                ATTEMPTS.to_string(),
                None,
                Some("The number of attempts for an individual operation".to_string()),
            ),
            errors: meter.create_monotonic_counter(
                ERRORS.to_string(),
                None,
                Some("The number of calls that ended in an error".to_string()),
            ),
            in_flight,
            in_flight_gauge,
        }
    }

    pub(crate) fn call_started(self: &Arc<Self>) -> InFlight {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight {
            metrics: self.clone(),
        }
    }

    pub(crate) fn record_call(&self, start: Instant, attributes: &Attributes, failed: bool) {
        self.call_duration
            .record(start.elapsed().as_secs_f64(), Some(attributes));
        if failed {
            self.errors.add(1, Some(attributes));
        }
    }

    pub(crate) fn record_resolve_endpoint(&self, start: Instant, attributes: &Attributes) {
        self.resolve_endpoint_duration
            .record(start.elapsed().as_secs_f64(), Some(attributes));
    }
}

impl Drop for ClientMetrics {
    fn drop(&mut self) {
        self.in_flight_gauge.stop();
    }
}

/// Decrements the in-flight count when the call completes or is cancelled
pub(crate) struct InFlight {
    metrics: Arc<ClientMetrics>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.metrics.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Counts every attempt, including the first, into `smithy.client.call.attempts`
#[derive(Clone, Debug)]
pub(crate) struct AttemptLayer {
    metrics: Arc<ClientMetrics>,
    attributes: Arc<Attributes>,
}

impl AttemptLayer {
    pub(crate) fn new(metrics: Arc<ClientMetrics>, attributes: Arc<Attributes>) -> Self {
        AttemptLayer {
            metrics,
            attributes,
        }
    }
}

impl<S> Layer<S> for AttemptLayer {
    type Service = AttemptService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AttemptService {
            inner,
            metrics: self.metrics.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct AttemptService<S> {
    inner: S,
    metrics: Arc<ClientMetrics>,
    attributes: Arc<Attributes>,
}

impl<S, Req> Service<Req> for AttemptService<S>
where
    S: Service<Req>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        self.metrics.attempts.add(1, Some(&*self.attributes));
        self.inner.call(req)
    }
}

/// Wraps the connector: each request is sent inside a `transmit` span and its round trip is
/// recorded into `smithy.client.call.transmit_duration`
#[derive(Clone, Debug)]
pub(crate) struct TransmitService<S> {
    inner: S,
    metrics: Arc<ClientMetrics>,
    attributes: Arc<Attributes>,
}

impl<S> TransmitService<S> {
    pub(crate) fn new(inner: S, metrics: Arc<ClientMetrics>, attributes: Arc<Attributes>) -> Self {
        TransmitService {
            inner,
            metrics,
            attributes,
        }
    }
}

impl<S> Service<http::Request<SdkBody>> for TransmitService<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>,
    S::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = TransmitFuture<tracing::instrument::Instrumented<S::Future>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(|err| err.into())
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> Self::Future {
        let span = debug_span!("transmit", method = %req.method(), uri = %req.uri());
        TransmitFuture {
            inner: self.inner.call(req).instrument(span),
            start: Instant::now(),
            metrics: self.metrics.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

#[pin_project]
pub(crate) struct TransmitFuture<F> {
    #[pin]
    inner: F,
    start: Instant,
    metrics: Arc<ClientMetrics>,
    attributes: Arc<Attributes>,
}

impl<F, E> Future for TransmitFuture<F>
where
    F: Future<Output = Result<http::Response<SdkBody>, E>>,
    E: Into<BoxError>,
{
    type Output = Result<http::Response<SdkBody>, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = match this.inner.poll(cx) {
            Poll::Ready(result) => result,
            Poll::Pending => return Poll::Pending,
        };
        this.metrics
            .transmit_duration
            .record(this.start.elapsed().as_secs_f64(), Some(&**this.attributes));
        Poll::Ready(result.map_err(|err| err.into()))
    }
}
