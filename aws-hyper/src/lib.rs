/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Transport and middleware stack for AWS service clients
//!
//! [`Client`] sends an [`Operation`](smithy_http::operation::Operation) through the standard AWS
//! middleware: endpoint resolution, credentials loading, user agent generation and SigV4 signing.
//! Responses are parsed by the operation's response handler and failed attempts are retried
//! according to the operation's retry policy.

pub mod conn;
mod instrument;
pub mod retry;
#[cfg(feature = "test-util")]
pub mod test_connection;

use crate::instrument::{AttemptLayer, ClientMetrics, TransmitService};
use crate::retry::{RetryConfig, RetryCtx, StandardRetryStrategy};
use aws_auth::middleware::CredentialsStage;
use aws_endpoint::AwsEndpointStage;
use aws_http::user_agent::UserAgentStage;
use aws_sig_auth::middleware::SigV4SigningStage;
use aws_sig_auth::signer::SigV4Signer;
use smithy_http::body::SdkBody;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::{Metadata, Operation};
use smithy_http::response::ParseHttpResponse;
use smithy_http::retry::ClassifyResponse;
use smithy_http::sleep::{default_async_sleep, AsyncSleep, Sleep};
use smithy_http_tower::dispatch::DispatchLayer;
use smithy_http_tower::map_request::{AsyncMapRequestLayer, MapRequestLayer};
use smithy_http_tower::parse_response::ParseResponseLayer;
use smithy_observability::attributes::Attributes;
use smithy_observability::global::global_telemetry_provider;
use smithy_observability::provider::TelemetryProvider;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tower::{Service, ServiceBuilder, ServiceExt};
use tracing::{debug_span, Instrument};

pub use smithy_http::result::{SdkError, SdkSuccess};

type BoxError = Box<dyn Error + Send + Sync>;

/// AWS Service Client
///
/// Hyper-based AWS Service Client. Most customers will want to construct a client with
/// [`Client::https`](Client::https). For testing & other more advanced use cases, a custom
/// connector may be used via [`Client::new(connector)`](Client::new).
///
/// The client is cheap to clone: clones share the retry quota and the metrics instruments.
///
/// The internal connector must implement the following trait bound to be used to dispatch requests:
/// ```rust,ignore
///    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
///        + Send
///        + Clone
///        + 'static,
///    S::Error: Into<BoxError> + Send + Sync + 'static,
///    S::Future: Send + 'static,
/// ```
#[derive(Clone)]
pub struct Client<S> {
    inner: S,
    retry_ctx: Arc<Mutex<RetryCtx>>,
    sleep_impl: Arc<dyn AsyncSleep>,
    telemetry: TelemetryProvider,
    metrics: Arc<ClientMetrics>,
}

impl<S: Debug> Debug for Client<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("inner", &self.inner)
            .field("sleep_impl", &self.sleep_impl)
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[derive(Debug)]
struct NoSleepImpl;

impl AsyncSleep for NoSleepImpl {
    fn sleep(&self, _duration: std::time::Duration) -> Sleep {
        tracing::warn!("no sleep implementation was configured; retrying without a delay");
        Sleep::ready()
    }
}

impl<S> Client<S> {
    /// Construct a new `Client` with a custom connector
    ///
    /// Retries follow [`RetryConfig::default`], backoff sleeps on the default async runtime and
    /// metrics go to the [global telemetry provider](smithy_observability::global::global_telemetry_provider).
    pub fn new(connector: S) -> Self {
        let telemetry = global_telemetry_provider();
        Client {
            inner: connector,
            retry_ctx: Arc::new(Mutex::new(RetryCtx::new(RetryConfig::default()))),
            sleep_impl: default_async_sleep().unwrap_or_else(|| Arc::new(NoSleepImpl)),
            metrics: Arc::new(ClientMetrics::new(&telemetry)),
            telemetry,
        }
    }

    /// Replace the retry configuration. The retry quota starts over.
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_ctx = Arc::new(Mutex::new(RetryCtx::new(retry_config)));
        self
    }

    /// Use a different sleep implementation for retry backoff
    pub fn with_sleep_impl(mut self, sleep_impl: Arc<dyn AsyncSleep>) -> Self {
        self.sleep_impl = sleep_impl;
        self
    }

    /// Record metrics into `telemetry` instead of the global provider
    pub fn with_telemetry(mut self, telemetry: TelemetryProvider) -> Self {
        self.metrics = Arc::new(ClientMetrics::new(&telemetry));
        self.telemetry = telemetry;
        self
    }

    pub fn telemetry(&self) -> &TelemetryProvider {
        &self.telemetry
    }
}

impl Client<conn::Standard> {
    /// Construct an `https` based client
    pub fn https() -> Self {
        Client::new(conn::Standard::https())
    }
}

fn call_attributes(metadata: Option<&Metadata>) -> Attributes {
    match metadata {
        Some(metadata) => Attributes::new()
            .with("rpc.service", metadata.service())
            .with("rpc.method", metadata.name()),
        None => Attributes::new(),
    }
}

impl<S> Client<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
        + Send
        + Clone
        + 'static,
    S::Error: Into<BoxError> + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    /// Dispatch this request to the network
    ///
    /// For ergonomics, this does not include the raw response for successful responses. To
    /// access the raw response use `call_raw`.
    pub async fn call<O, T, E, R>(&self, input: Operation<O, R>) -> Result<T, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>> + Send + Sync + Clone + 'static,
        R: ClassifyResponse<SdkSuccess<T>, SdkError<E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        self.call_raw(input).await.map(|res| res.parsed)
    }

    /// Dispatch this request to the network
    ///
    /// The returned result contains the raw HTTP response which can be useful for debugging or
    /// implementing unsupported features.
    pub async fn call_raw<O, T, E, R>(
        &self,
        input: Operation<O, R>,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>> + Send + Sync + Clone + 'static,
        R: ClassifyResponse<SdkSuccess<T>, SdkError<E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let attributes = Arc::new(call_attributes(input.metadata()));
        let span = match input.metadata() {
            Some(metadata) => debug_span!(
                "send_operation",
                operation = metadata.name(),
                service = metadata.service()
            ),
            None => debug_span!("send_operation"),
        };
        let _in_flight = self.metrics.call_started();
        let start = Instant::now();
        let result = self
            .send_operation(input, attributes.clone())
            .instrument(span)
            .await;
        self.metrics
            .record_call(start, &attributes, result.is_err());
        result
    }

    async fn send_operation<O, T, E, R>(
        &self,
        input: Operation<O, R>,
        attributes: Arc<Attributes>,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>> + Send + Sync + Clone + 'static,
        R: ClassifyResponse<SdkSuccess<T>, SdkError<E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        // The endpoint only depends on configuration; it is resolved once, before any attempt.
        let (request, parts) = input.into_request_response();
        let endpoint_start = Instant::now();
        let request = debug_span!("resolve_endpoint").in_scope(|| AwsEndpointStage.apply(request));
        self.metrics
            .record_resolve_endpoint(endpoint_start, &attributes);
        let request = request.map_err(|err| SdkError::ConstructionFailure(err.into()))?;
        let input = Operation::from_parts(request, parts);

        let connector = TransmitService::new(
            self.inner.clone(),
            self.metrics.clone(),
            attributes.clone(),
        );
        let signer = MapRequestLayer::for_mapper(SigV4SigningStage::new(SigV4Signer::new()));
        let credentials = AsyncMapRequestLayer::for_mapper(CredentialsStage::new());
        let user_agent = MapRequestLayer::for_mapper(UserAgentStage::new());
        let svc = ServiceBuilder::new()
            .retry(StandardRetryStrategy::new(
                self.retry_ctx.clone(),
                self.sleep_impl.clone(),
            ))
            .layer(AttemptLayer::new(self.metrics.clone(), attributes))
            .layer(ParseResponseLayer::<O, R>::new())
            .layer(credentials)
            .layer(user_agent)
            .layer(signer)
            .layer(DispatchLayer::new())
            .service(connector);
        svc.oneshot(input).await
    }
}

#[cfg(test)]
mod tests {
    use crate::conn::Standard;
    use crate::Client;

    #[test]
    fn client_is_send_sync_clone() {
        fn is_send_sync<T: Send + Sync + Clone>(_: T) {}
        is_send_sync(Client::new(Standard::https()));
    }

    #[test]
    fn client_with_dyn_connector() {
        let client = Client::new(Standard::new(tower::service_fn(
            |_req: http::Request<smithy_http::body::SdkBody>| async move {
                Ok::<_, crate::BoxError>(http::Response::new(smithy_http::body::SdkBody::empty()))
            },
        )));
        let _ = client.clone();
    }
}
